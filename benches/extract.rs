// benches/extract.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use poll_scrape::{
    party::PartyClassifier,
    scrape,
    specs::polls::{extract_day, split_day_blocks, DayBlock},
};

const COLOURS: [&str; 3] = ["#006aff", "#ff3333", "#ffa600"];

/// One day block with `polls` rows of three candidates each.
fn synthetic_block(polls: usize) -> DayBlock {
    let mut rows = String::new();
    for i in 0..polls {
        let mut answers = String::new();
        for (c, colour) in COLOURS.iter().enumerate() {
            answers.push_str(&format!(
                r#"<div class="heat-map" style="background-color:{colour};"></div>Cand{} {}%"#,
                ["a", "b", "c"][c],
                40 - c * 15 + i % 5,
            ));
        }
        rows.push_str(&format!(
            r#"<tr class="visible-row"><td class="type hide-mobile single first">U.S. Senate</td>
<td><a target="_blank">Pollster {i}</a><div class="gradeText">B</div></td>
<td class="dates hide-desktop">Sep 1-3<br><span>Maine</span><br>{} LV</td>
<td class="answers hide-desktop">{answers}</td>
<td class="net hide-mobile dem">+{}</td></tr>"#,
            500 + i,
            i % 9,
        ));
    }
    DayBlock::new(format!(
        r#"<div class="day-container"><h2 class="day" data-date="2020-10-01"></h2><table><tbody>{rows}</tbody></table></div>"#
    ))
}

fn bench_extract(c: &mut Criterion) {
    let classifier = PartyClassifier::embedded().unwrap();
    let block = synthetic_block(40);
    let page = format!("<html><body>{}</body></html>", block.html().repeat(10));

    c.bench_function("classifier_train", |b| {
        b.iter(|| black_box(PartyClassifier::embedded().unwrap().epochs()))
    });

    c.bench_function("extract_day_40_polls", |b| {
        b.iter(|| {
            let rows = extract_day(black_box(&block), &classifier).unwrap();
            black_box(rows.len())
        })
    });

    c.bench_function("page_to_table_400_polls", |b| {
        b.iter(|| {
            let blocks = split_day_blocks(black_box(&page));
            let rows = scrape::process_day_blocks(&blocks, &classifier).unwrap();
            black_box(scrape::dedup_records(rows).len())
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
