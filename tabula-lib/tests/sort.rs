//! Tests for the sort engine.

use std::str::FromStr;

use rust_decimal::Decimal;
use tabula_lib::model::{Record, Value};
use tabula_lib::view::sort::{sort_records, sorted_indices};
use tabula_lib::view::{Column, SortState};

fn columns() -> Vec<Column<Record>> {
    vec![
        Column::field("name", "Name"),
        Column::field("amount", "Amount")
            .render(|r: &Record| format!("${}.00", r.get_long("amount").ok().flatten().unwrap_or(0))),
        Column::field("notes", "Notes").unsortable(),
    ]
}

fn names(rows: &[&Record]) -> Vec<String> {
    rows.iter().filter_map(|r| r.key()).collect()
}

fn amounts(rows: &[&Record]) -> Vec<i64> {
    rows.iter()
        .map(|r| r.get_long("amount").unwrap().unwrap())
        .collect()
}

#[test]
fn test_equal_keys_keep_input_order() {
    let records = vec![
        Record::new().set("name", "c").set("amount", 5i64),
        Record::new().set("name", "a").set("amount", 5i64),
        Record::new().set("name", "b").set("amount", 1i64),
    ];
    let sorted = sort_records(&records, &columns(), &SortState::asc("amount"));
    assert_eq!(names(&sorted), ["b", "c", "a"]);
}

#[test]
fn test_sorting_twice_gives_same_order() {
    let records: Vec<Record> = (0..30)
        .map(|i| {
            Record::new()
                .set("name", format!("r{i}"))
                .set("amount", i64::from(i % 4))
        })
        .collect();
    let sort = SortState::asc("amount");
    let first = sorted_indices(&records, &columns(), &sort);
    let second = sorted_indices(&records, &columns(), &sort);
    assert_eq!(first, second);

    // Within each tie group, input order is preserved.
    for pair in first.windows(2) {
        let a = records[pair[0]].get_long("amount").unwrap();
        let b = records[pair[1]].get_long("amount").unwrap();
        if a == b {
            assert!(pair[0] < pair[1]);
        }
    }
}

#[test]
fn test_descending_reverses_tie_groups_as_blocks() {
    let records = vec![
        Record::new().set("name", "a1").set("amount", 1i64),
        Record::new().set("name", "b2").set("amount", 2i64),
        Record::new().set("name", "a2").set("amount", 1i64),
        Record::new().set("name", "c3").set("amount", 3i64),
        Record::new().set("name", "b1").set("amount", 2i64),
    ];
    let asc = sort_records(&records, &columns(), &SortState::asc("amount"));
    let desc = sort_records(&records, &columns(), &SortState::desc("amount"));

    assert_eq!(names(&asc), ["a1", "a2", "b2", "b1", "c3"]);
    assert_eq!(names(&desc), ["c3", "b2", "b1", "a1", "a2"]);

    // Without ties, descending is the exact reverse of ascending.
    let distinct: Vec<Record> = (0..10)
        .map(|i| Record::new().set("amount", i64::from((i * 7) % 10)))
        .collect();
    let asc = sort_records(&distinct, &columns(), &SortState::asc("amount"));
    let mut desc = sort_records(&distinct, &columns(), &SortState::desc("amount"));
    desc.reverse();
    assert_eq!(amounts(&asc), amounts(&desc));
}

#[test]
fn test_rendered_column_sorts_by_raw_number() {
    let records = vec![
        Record::new().set("amount", 9i64),
        Record::new().set("amount", 10i64),
        Record::new().set("amount", 2i64),
    ];
    let cols = columns();
    let sorted = sort_records(&records, &cols, &SortState::asc("amount"));
    assert_eq!(amounts(&sorted), [2, 9, 10]);
    // The cells still show the rendered text.
    assert_eq!(cols[1].display(sorted[2]), "$10.00");
}

#[test]
fn test_missing_values_first_ascending_last_descending() {
    let records = vec![
        Record::new().set("name", "x").set("amount", 3i64),
        Record::new().set("name", "missing"),
        Record::new().set("name", "y").set("amount", 1i64),
        Record::new().set("name", "null").set("amount", Value::Null),
    ];
    let asc = sort_records(&records, &columns(), &SortState::asc("amount"));
    assert_eq!(names(&asc), ["missing", "null", "y", "x"]);

    let desc = sort_records(&records, &columns(), &SortState::desc("amount"));
    assert_eq!(names(&desc), ["x", "y", "missing", "null"]);
}

#[test]
fn test_strings_sort_case_insensitively() {
    let records = vec![
        Record::new().set("name", "bob"),
        Record::new().set("name", "Alice"),
        Record::new().set("name", "carol"),
        Record::new().set("name", "alice"),
    ];
    let sorted = sort_records(&records, &columns(), &SortState::asc("name"));
    assert_eq!(names(&sorted), ["Alice", "alice", "bob", "carol"]);
}

#[test]
fn test_unknown_or_unsortable_column_keeps_input_order() {
    let records = vec![
        Record::new().set("name", "b").set("notes", "z"),
        Record::new().set("name", "a").set("notes", "y"),
    ];
    let unknown = sorted_indices(&records, &columns(), &SortState::asc("nope"));
    assert_eq!(unknown, [0, 1]);
    let unsortable = sorted_indices(&records, &columns(), &SortState::asc("notes"));
    assert_eq!(unsortable, [0, 1]);
}

#[test]
fn test_input_is_not_mutated() {
    let records = vec![
        Record::new().set("name", "b"),
        Record::new().set("name", "a"),
    ];
    let before = records.clone();
    let _ = sort_records(&records, &columns(), &SortState::asc("name"));
    assert_eq!(records, before);
}

#[test]
fn test_typed_rows() {
    #[derive(Clone)]
    struct Pledge {
        donor: &'static str,
        pledged: f64,
    }
    impl tabula_lib::model::TableRow for Pledge {}

    let rows = vec![
        Pledge { donor: "x", pledged: 12.5 },
        Pledge { donor: "y", pledged: 2.25 },
        Pledge { donor: "z", pledged: 100.0 },
    ];
    let cols = vec![
        Column::new("donor", "Donor", |p: &Pledge| Value::from(p.donor)),
        Column::new("pledged", "Pledged", |p: &Pledge| Value::from(p.pledged)),
    ];
    let sorted = sort_records(&rows, &cols, &SortState::desc("pledged"));
    let donors: Vec<&str> = sorted.iter().map(|p| p.donor).collect();
    assert_eq!(donors, ["z", "x", "y"]);
}

/// Deterministic pseudo-random sequence for building loosely typed data.
fn lcg(seed: u64) -> impl Iterator<Item = u64> {
    std::iter::successors(Some(seed), |x| {
        Some(x.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407))
    })
    .map(|x| x >> 33)
}

#[test]
fn test_numbers_mixed_with_numeric_strings_sort_as_text() {
    let records = vec![
        Record::new().set("name", "ten").set("amount", 10i64),
        Record::new().set("name", "five").set("amount", "5"),
        Record::new().set("name", "nine").set("amount", 9i64),
    ];
    let sorted = sort_records(&records, &columns(), &SortState::asc("amount"));
    assert_eq!(names(&sorted), ["ten", "five", "nine"]);
}

#[test]
fn test_loosely_typed_column_sorts_deterministically() {
    let amount_col = columns();
    for seed in 0..50u64 {
        let records: Vec<Record> = lcg(seed)
            .take(64)
            .enumerate()
            .map(|(i, x)| {
                let n = (x % 200) as i64 - 50;
                let amount = match x % 4 {
                    _ if i == 0 => Value::from("7"),
                    0 => Value::Long(n),
                    1 => Value::from(n.to_string()),
                    2 => Value::Null,
                    _ => Value::Float(n as f64 / 4.0),
                };
                Record::new().set("name", format!("r{i:02}")).set("amount", amount)
            })
            .collect();

        for sort in [SortState::asc("amount"), SortState::desc("amount")] {
            let order = sorted_indices(&records, &amount_col, &sort);
            assert_eq!(order, sorted_indices(&records, &amount_col, &sort));

            let mut seen = order.clone();
            seen.sort_unstable();
            assert_eq!(seen, (0..records.len()).collect::<Vec<_>>());

            // Any string in the column switches the whole pass to text.
            for pair in order.windows(2) {
                let a = records[pair[0]].value("amount").sort_text();
                let b = records[pair[1]].value("amount").sort_text();
                if sort.direction.is_ascending() {
                    assert!(a <= b, "seed {seed}: {a:?} before {b:?}");
                } else {
                    assert!(a >= b, "seed {seed}: {a:?} before {b:?}");
                }
                if a == b {
                    assert!(pair[0] < pair[1]);
                }
            }
        }
    }
}

#[test]
fn test_mixed_numeric_variants_sort_numerically() {
    let values = [
        Value::Long(10),
        Value::Int(-3),
        Value::Float(2.5),
        Value::Decimal(Decimal::from_str("9.75").unwrap()),
        Value::Null,
    ];
    let records: Vec<Record> = (0..25)
        .map(|i| {
            Record::new()
                .set("name", format!("n{i:02}"))
                .set("amount", values[i % values.len()].clone())
        })
        .collect();
    let cols = columns();

    let asc = sort_records(&records, &cols, &SortState::asc("amount"));
    let rank = |r: &Record| match r.value("amount") {
        Value::Null => 0,
        Value::Int(_) => 1,
        Value::Float(_) => 2,
        Value::Decimal(_) => 3,
        _ => 4,
    };
    let ranks: Vec<i32> = asc.iter().map(|r| rank(r)).collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
    // 9.75 before 10, although "10" < "9.75" as text.
    assert_eq!(asc.last().map(|r| r.value("amount")), Some(Value::Long(10)));
    assert_eq!(names(&asc)[..5], ["n04", "n09", "n14", "n19", "n24"]);

    let desc = sort_records(&records, &cols, &SortState::desc("amount"));
    assert_eq!(desc[0].value("amount"), Value::Long(10));
    assert!(desc[20..].iter().all(|r| r.value("amount").is_null()));
}
