use std::fs;
use std::io::Cursor;
use std::path::Path;

use chrono::NaiveDate;
use poforge_app::dispatcher::Dispatcher;
use poforge_core::SessionId;
use poforge_purchasing::{OrderSession, SessionState};

fn dispatcher(output_dir: &Path) -> Dispatcher {
    let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
    let session = OrderSession::new(SessionId::new(), date);
    Dispatcher::new(session, output_dir, "Location")
}

fn drive(dispatcher: &mut Dispatcher, script: &str) -> String {
    let mut output = Vec::new();
    poforge_app::run(Cursor::new(script), &mut output, dispatcher).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn build_and_export_an_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut d = dispatcher(dir.path());

    let transcript = drive(
        &mut d,
        "supplier Amazon\n\
         add Chair | 25.00 | Shop A\n\
         add Table | 75.50 | ShopA\n\
         export\n\
         quit\n",
    );

    assert!(transcript.contains("No items yet. Total: £0.00"));
    assert!(transcript.contains("Added item 2 (171026-2-75-ShopA-AM)"));
    assert!(transcript.contains("Total: £100.50 (2 items)"));
    assert!(transcript.ends_with("Bye.\n"));

    let csv = fs::read_to_string(dir.path().join("PO-171026-AM.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "1,Chair,25.00,ShopA,AM,2026-10-17,171026-1-25-ShopA-AM");
    assert!(lines[3].contains("100.50"));

    let pdf = fs::read(dir.path().join("PO-171026-AM.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF-1.4"));
    assert!(pdf.ends_with(b"%%EOF\n"));
}

#[test]
fn removed_numbers_are_not_reused_until_reset() {
    let dir = tempfile::tempdir().unwrap();
    let mut d = dispatcher(dir.path());

    drive(
        &mut d,
        "add A | 1\n\
         add B | 2\n\
         remove\n\
         add C | 3\n",
    );
    let sequences: Vec<u32> = d.session().items().iter().map(|i| i.sequence).collect();
    assert_eq!(sequences, vec![1, 3]);

    drive(&mut d, "reset\nadd D | 4\n");
    assert_eq!(d.session().items()[0].sequence, 1);
    assert_eq!(d.session().item_count(), 1);
}

#[test]
fn rejected_input_is_reported_and_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let mut d = dispatcher(dir.path());

    let transcript = drive(
        &mut d,
        "remove\n\
         add | 5\n\
         add Bolt | -1\n\
         export pdf\n\
         launch\n",
    );

    assert!(transcript.contains("warning: Nothing to remove"));
    assert!(transcript.contains("warning: Please enter a description and cost"));
    assert!(transcript.contains("warning: nothing to export"));
    assert!(transcript.contains("warning: unknown command 'launch'"));
    assert_eq!(d.session().state(), SessionState::Empty);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn end_of_input_stops_the_loop() {
    let dir = tempfile::tempdir().unwrap();
    let mut d = dispatcher(dir.path());

    let transcript = drive(&mut d, "add Screws | 4.99\n");
    assert!(!transcript.contains("Bye."));
    assert_eq!(d.session().item_count(), 1);
}

#[test]
fn free_text_supplier_becomes_code() {
    let dir = tempfile::tempdir().unwrap();
    let mut d = dispatcher(dir.path());

    drive(&mut d, "supplier Corner Shop\nadd Glue | 3.20 | Van\nexport csv\n");

    assert_eq!(d.session().supplier_code(), "CornerShop");
    assert!(dir.path().join("PO-171026-CornerShop.csv").exists());
    assert!(!dir.path().join("PO-171026-CornerShop.pdf").exists());
}
