// tests/export_roundtrip.rs
mod common;

use std::fs;

use common::tmp_dir;
use menu_scrape::s;
use menu_scrape::{
    config::options::ExportFormat,
    export::{read_spreadsheet, write_spreadsheet},
    menu::MenuItem,
    merge::MergedRow,
};

fn rows() -> Vec<MergedRow> {
    let en = |cat: &str, name: &str| MenuItem {
        id: Some(format!("{}", name.len())),
        price: Some(s!("12.5")),
        ..MenuItem::new(cat, name)
    };
    vec![
        MergedRow {
            english: Some(MenuItem {
                description: Some(s!("Served with \"garlic\" sauce, pickles\nand fries")),
                image_url: Some(s!("https://cdn.menus.test/a.jpg?w=800&h=600")),
                ..en("Sandwiches", "Shawarma, large")
            }),
            arabic: Some(MenuItem::new("سندويشات", "شاورما كبير")),
        },
        MergedRow { english: Some(en("Drinks", "Tea")), arabic: None },
        MergedRow { english: None, arabic: Some(MenuItem::new("حلويات", "كنافة")) },
    ]
}

#[test]
fn csv_round_trip_keeps_every_value() {
    let dir = tmp_dir("roundtrip_csv");
    let path = dir.join("menu_data.csv");
    let rows = rows();

    write_spreadsheet(&rows, &path, ExportFormat::Csv).unwrap();
    assert_eq!(read_spreadsheet(&path).unwrap(), rows);
}

#[test]
fn tsv_round_trip_keeps_every_value() {
    let dir = tmp_dir("roundtrip_tsv");
    let path = dir.join("nested").join("menu_data.tsv");
    let rows = rows();

    write_spreadsheet(&rows, &path, ExportFormat::Tsv).unwrap();
    assert_eq!(read_spreadsheet(&path).unwrap(), rows);
}

#[test]
fn sheet_starts_with_bom_and_header() {
    let dir = tmp_dir("roundtrip_bom");
    let path = dir.join("menu_data.csv");
    write_spreadsheet(&rows(), &path, ExportFormat::Csv).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("\u{FEFF}Id (EN),Id (AR),Category (EN)"));
}

#[test]
fn unwritable_destination_is_an_error() {
    let dir = tmp_dir("roundtrip_blocked");
    let blocker = dir.join("file");
    fs::write(&blocker, "x").unwrap();
    // Parent is a regular file, so the directory cannot be created.
    let path = blocker.join("menu_data.csv");
    assert!(write_spreadsheet(&rows(), &path, ExportFormat::Csv).is_err());
}
