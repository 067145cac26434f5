//! CSV rendering (RFC 4180 quoting via the `csv` crate).

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::ExportError;
use crate::table::{ExportTable, HEADERS};

/// Header row, one row per item, then the TOTAL row. UTF-8, `\n` terminated.
pub fn render_csv(table: &ExportTable) -> Result<Vec<u8>, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADERS)?;
    for row in table.rows() {
        writer.write_record(row.fields())?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::fixtures::chair_and_table;

    use poforge_core::Cost;

    #[test]
    fn renders_header_items_and_total() {
        let table = ExportTable::from_session(&chair_and_table()).unwrap();
        let csv = String::from_utf8(render_csv(&table).unwrap()).unwrap();

        let expected = "\
Item No.,Description,Cost (£),Location,Supplier,Date,SKU
1,Chair,25.00,ShopA,AM,2026-10-17,171026-1-25-ShopA-AM
2,Table,75.50,ShopA,AM,2026-10-17,171026-2-75-ShopA-AM
,TOTAL,100.50,,,,
";
        assert_eq!(csv, expected);
    }

    #[test]
    fn quotes_commas_and_quotes_in_descriptions() {
        let mut session = chair_and_table();
        session
            .add_item("Screws, 4mm \"brass\"", Cost::from_pennies(350), "Bay-2")
            .unwrap();
        let table = ExportTable::from_session(&session).unwrap();
        let bytes = render_csv(&table).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(records.len(), 4);
        assert_eq!(&records[2][1], "Screws, 4mm \"brass\"");
        assert_eq!(&records[2][6], "171026-3-3-Bay-2-AM");
        assert_eq!(&records[3][1], "TOTAL");
        assert_eq!(&records[3][2], "104.00");
    }

    #[test]
    fn data_rows_sum_to_total_row() {
        let table = ExportTable::from_session(&chair_and_table()).unwrap();
        let bytes = render_csv(&table).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        let (total, data) = records.split_last().unwrap();

        let sum: Cost = data.iter().map(|r| r[2].parse::<Cost>().unwrap()).sum();
        assert_eq!(data.len(), 2);
        assert_eq!(sum.to_string(), &total[2]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        use chrono::NaiveDate;
        use poforge_core::SessionId;
        use poforge_purchasing::OrderSession;

        #[derive(Debug, Clone)]
        enum Op {
            Add(String, i64, String),
            Remove,
            Reset,
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                4 => ("[A-Za-z][A-Za-z0-9 ,\"]{0,20}", 1i64..10_000_000, "[A-Za-z ]{0,10}")
                    .prop_map(|(d, c, l)| Op::Add(d, c, l)),
                2 => Just(Op::Remove),
                1 => Just(Op::Reset),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 128,
                ..ProptestConfig::default()
            })]

            /// Property: after any history of adds, removes and resets, the CSV data
            /// rows read back sum to the TOTAL row.
            #[test]
            fn csv_cost_column_sums_to_total(ops in prop::collection::vec(op(), 1..30)) {
                let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
                let mut session = OrderSession::new(SessionId::new(), date);
                session.select_supplier("Toolstation").unwrap();

                for op in ops {
                    match op {
                        Op::Add(d, c, l) => {
                            session.add_item(d, Cost::from_pennies(c), l).unwrap();
                        }
                        Op::Remove => {
                            let _ = session.remove_last_item();
                        }
                        Op::Reset => session.reset(),
                    }
                }

                let table = match ExportTable::from_session(&session) {
                    Ok(table) => table,
                    Err(err) => {
                        prop_assert!(matches!(err, ExportError::EmptyOrder));
                        prop_assert_eq!(session.item_count(), 0);
                        return Ok(());
                    }
                };
                let bytes = render_csv(&table).unwrap();

                let mut reader = csv::Reader::from_reader(bytes.as_slice());
                let records: Vec<csv::StringRecord> =
                    reader.records().map(Result::unwrap).collect();
                let (total, data) = records.split_last().unwrap();

                prop_assert_eq!(data.len(), session.item_count());
                prop_assert_eq!(&total[1], "TOTAL");
                let sum: Cost = data.iter().map(|r| r[2].parse::<Cost>().unwrap()).sum();
                prop_assert_eq!(sum.to_string(), &total[2]);
                prop_assert_eq!(sum, session.running_total());
            }
        }
    }
}
