// tests/markets.rs
use std::fs;
use std::path::PathBuf;

use poll_scrape::election::ElectionType;
use poll_scrape::specs::markets::{combine, read_listing, MarketRow};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("poll_scrape_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

const HEADER: &str = "ContractName,Date,OpenSharePrice,HighSharePrice,LowSharePrice,CloseSharePrice,TradeVolume\n";

#[test]
fn listing_exports_are_combined_and_tagged() {
    let dir = tmp_dir("markets_combine");
    fs::write(
        dir.join("maine_2.csv"),
        format!("{HEADER}Golden,10/20/2020 12:00:00 AM,$0.70,$0.72,$0.69,$0.71,350\n"),
    )
    .unwrap();
    fs::write(
        dir.join("iowa.csv"),
        format!("{HEADER}Greenfield,10/21/2020 12:00:00 AM,$0.50,$0.52,$0.48,$0.51,900\nErnst,10/21/2020 12:00:00 AM,$0.50,$0.50,$0.47,$0.49,800\n"),
    )
    .unwrap();
    fs::write(
        dir.join("listing.csv"),
        "election,location,district,export\nhouse,maine,2,maine_2.csv\nsenate,iowa,0,iowa.csv\nsenate,georgia,0,never_downloaded.csv\n",
    )
    .unwrap();

    let listings = read_listing(&dir.join("listing.csv")).unwrap();
    assert_eq!(listings.len(), 3);

    let rows = combine(&listings).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].election, ElectionType::House);
    assert_eq!(rows[0].district, 2);
    assert_eq!(
        rows[0].to_row(),
        vec!["house", "maine", "2", "Golden", "350", "2020-10-20", "0.71"]
    );
    assert_eq!(rows[2].record.contract, "Ernst");
    assert!(rows[1..].iter().all(|r| r.location == "iowa" && r.district == 0));
    assert_eq!(MarketRow::headers().join(","), "election,state,district,contract,volume,market_date,price");
}

#[test]
fn malformed_export_is_an_error() {
    let dir = tmp_dir("markets_bad");
    fs::write(dir.join("bad.csv"), format!("{HEADER}X,10/20/2020,n/a,,,oops,1\n")).unwrap();
    fs::write(dir.join("listing.csv"), "election,location,district,export\nsenate,iowa,0,bad.csv\n").unwrap();
    let listings = read_listing(&dir.join("listing.csv")).unwrap();
    assert!(combine(&listings).is_err());
}
