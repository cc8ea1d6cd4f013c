// tests/extract_day.rs
use chrono::NaiveDate;

use poll_scrape::election::ElectionType;
use poll_scrape::party::{Party, PartyClassifier};
use poll_scrape::specs::polls::{extract_day, DayBlock};
use poll_scrape::Error;

const DEM: &str = "#006aff";
const REP: &str = "#ff3333";
const IND: &str = "#ffa600";

struct Poll<'a> {
    pollster: &'a str,
    grade: Option<&'a str>,
    location: &'a str,
    sample: &'a str,
    results: &'a [(&'a str, &'a str)], // (packed text, colour)
    net: Option<(&'a str, &'a str)>,   // (party class, value)
}

fn row(p: &Poll<'_>, marker_class: &str, marker: &str) -> String {
    let grade = p.grade.map(|g| format!(r#"<div class="gradeText">{g}</div>"#)).unwrap_or_default();
    let mut answers = String::new();
    for (text, colour) in p.results {
        answers.push_str(&format!(
            "\n  <div class=\"heat-map\" style=\"background-color:{colour};\"></div>{text}%"
        ));
    }
    let net = p
        .net
        .map(|(party, v)| format!(r#"<td class="net hide-mobile {party}">{v}</td>"#))
        .unwrap_or_else(|| r#"<td class="net hide-mobile">EVEN</td>"#.to_string());
    format!(
        r#"<tr class="visible-row">
  <td class="{marker_class}">{marker}</td>
  <td class="pollster"><a href="/p" target="_blank">{pollster}</a>{grade}</td>
  <td class="dates hide-desktop">Sep 28-30<br><span>{location}</span><br>{sample}</td>
  <td class="answers hide-desktop">{answers}
  </td>
  {net}
</tr>"#,
        pollster = p.pollster,
        location = p.location,
        sample = p.sample,
    )
}

fn block(date: Option<&str>, marker_class: &str, marker: &str, polls: &[Poll<'_>]) -> DayBlock {
    let h2 = date
        .map(|d| format!(r#"<h2 class="day" data-date="{d}">Day</h2>"#))
        .unwrap_or_default();
    let rows: String = polls.iter().map(|p| row(p, marker_class, marker)).collect();
    DayBlock::new(format!(
        r#"<div class="day-container">{h2}<table><tbody>{rows}</tbody></table></div>"#
    ))
}

fn senate_block(polls: &[Poll<'_>]) -> DayBlock {
    block(Some("2020-10-01"), "type hide-mobile single first", "U.S. Senate", polls)
}

fn smith_jones() -> Poll<'static> {
    Poll {
        pollster: "Acme Polls*",
        grade: Some("B+"),
        location: "Maine",
        sample: "1,200 LV",
        results: &[("Smith 45", DEM), ("Jones 40", REP)],
        net: Some(("dem", "+5")),
    }
}

fn classifier() -> PartyClassifier {
    PartyClassifier::embedded().unwrap()
}

#[test]
fn two_candidates_one_poll() {
    let out = extract_day(&senate_block(&[smith_jones()]), &classifier()).unwrap();
    assert_eq!(out.len(), 2);

    let (a, b) = (&out[0], &out[1]);
    assert_eq!((a.candidate.as_str(), a.polling_pct, a.party), ("Smith", 45, Party::Dem));
    assert_eq!((b.candidate.as_str(), b.polling_pct, b.party), ("Jones", 40, Party::Rep));
    assert_eq!(a.poll_id, b.poll_id);
    assert_eq!(a.poll_id.to_string(), "2020-10-01-U.S. Senate-0");

    assert_eq!(a.election, ElectionType::Senate);
    assert_eq!(a.location, "Maine");
    assert_eq!(a.poll_date, NaiveDate::from_ymd_opt(2020, 10, 1).unwrap());
    assert_eq!(a.sample_size, 1200);
    assert_eq!(a.voter_type, "LV");
    assert_eq!(a.pollster_grade.as_deref(), Some("B+"));
}

#[test]
fn sponsorship_mark_is_stripped() {
    let mut plain = smith_jones();
    plain.pollster = "Acme Polls";
    let out = extract_day(&senate_block(&[smith_jones(), plain]), &classifier()).unwrap();
    assert_eq!(out[0].pollster, "Acme Polls");
    assert!(out[0].sponsored);
    assert_eq!(out[2].pollster, "Acme Polls");
    assert!(!out[2].sponsored);
}

#[test]
fn net_margin_goes_to_leader_only() {
    let out = extract_day(&senate_block(&[smith_jones()]), &classifier()).unwrap();
    assert_eq!(out[0].net_polling, 5);
    assert_eq!(out[1].net_polling, 0);
}

#[test]
fn missing_optional_fields_default() {
    let poll = Poll { pollster: "Acme Polls", grade: None, net: None, ..smith_jones() };
    let out = extract_day(&senate_block(&[poll]), &classifier()).unwrap();
    assert!(out.iter().all(|r| r.net_polling == 0));
    assert!(out.iter().all(|r| r.pollster_grade.is_none() && !r.sponsored));
}

#[test]
fn polls_in_a_block_are_numbered() {
    let third = Poll {
        results: &[("Smith 44", DEM), ("Jones 41", REP), ("Lee 5", IND)],
        ..smith_jones()
    };
    let out = extract_day(&senate_block(&[smith_jones(), third]), &classifier()).unwrap();
    assert_eq!(out.len(), 5);
    assert_eq!(out[1].poll_id.seq, 0);
    assert_eq!(out[2].poll_id.seq, 1);
    assert_eq!(out[4].party, Party::Ind);
    assert_eq!(out[4].candidate, "Lee");
}

#[test]
fn marker_falls_back_to_last_cell_class() {
    let poll = Poll { location: "ME-2", ..smith_jones() };
    let b = block(Some("2020-10-01"), "type hide-mobile single first last", "U.S. House", &[poll]);
    let out = extract_day(&b, &classifier()).unwrap();
    assert_eq!(out[0].election, ElectionType::House);
    assert_eq!(out[0].location, "ME-2");
    assert_eq!(out[0].district, 0);
}

#[test]
fn missing_markers_fail_the_block() {
    let no_date = block(None, "type hide-mobile single first", "U.S. Senate", &[smith_jones()]);
    let err = extract_day(&no_date, &classifier()).unwrap_err();
    assert!(matches!(err, Error::MissingMarker { marker: "date" }));
    assert!(err.is_day_block_failure());

    let no_marker = block(Some("2020-10-01"), "type hide-mobile", "U.S. Senate", &[smith_jones()]);
    assert!(matches!(
        extract_day(&no_marker, &classifier()),
        Err(Error::MissingMarker { marker: "election" })
    ));

    let garbled = block(Some("Oct. 1"), "type hide-mobile single first", "U.S. Senate", &[smith_jones()]);
    assert!(matches!(
        extract_day(&garbled, &classifier()),
        Err(Error::MissingMarker { marker: "date" })
    ));
}

#[test]
fn unknown_race_and_bad_segments() {
    let gov = block(Some("2020-10-01"), "type hide-mobile single first", "Governor", &[smith_jones()]);
    let err = extract_day(&gov, &classifier()).unwrap_err();
    assert!(matches!(err, Error::UnknownElection(_)));
    assert!(err.is_day_block_failure());

    let bad = Poll { results: &[("45 Smith", DEM)], ..smith_jones() };
    let err = extract_day(&senate_block(&[bad]), &classifier()).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
    assert!(!err.is_day_block_failure());
}

#[test]
fn accented_names_are_transliterated() {
    let poll = Poll { results: &[("Peña 48", DEM), ("O'Neil 44", REP)], ..smith_jones() };
    let out = extract_day(&senate_block(&[poll]), &classifier()).unwrap();
    assert_eq!(out[0].candidate, "Pena");
    assert_eq!(out[1].candidate, "ONeil");
}
