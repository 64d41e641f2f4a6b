//! Column specs given on the command line.

use tabula_lib::model::Record;
use tabula_lib::view::{Alignment, Column};

use crate::error::CliError;

/// Parse `field[:align][:width]`, comma separated.
pub fn parse_columns(spec: &str) -> Result<Vec<Column<Record>>, CliError> {
    spec.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_column)
        .collect()
}

fn parse_column(spec: &str) -> Result<Column<Record>, CliError> {
    let mut parts = spec.split(':');
    let field = parts
        .next()
        .filter(|f| !f.is_empty())
        .ok_or_else(|| CliError::ColumnSpec(spec.to_string()))?;
    let mut column = Column::field(field, field);

    for part in parts {
        column = match part {
            "left" => column.align(Alignment::Left),
            "right" => column.align(Alignment::Right),
            "center" => column.align(Alignment::Center),
            width => match width.parse::<u16>() {
                Ok(w) if w > 0 => column.width(w),
                _ => return Err(CliError::ColumnSpec(spec.to_string())),
            },
        };
    }
    Ok(column)
}

/// One column per field of the first record, alphabetically.
pub fn columns_from_records(records: &[Record]) -> Vec<Column<Record>> {
    records
        .first()
        .map(|first| {
            first
                .field_names()
                .into_iter()
                .map(|name| Column::field(name, name))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_alignment_and_width() {
        let cols = parse_columns("name, amount:right:10 ,memo:center").unwrap();
        assert_eq!(cols.len(), 3);
        assert_eq!(cols[0].id(), "name");
        assert_eq!(cols[1].alignment(), Alignment::Right);
        assert_eq!(cols[1].fixed_width(), Some(10));
        assert_eq!(cols[2].alignment(), Alignment::Center);
    }

    #[test]
    fn rejects_bad_parts() {
        assert!(parse_columns("amount:sideways").is_err());
        assert!(parse_columns("amount:0").is_err());
        assert!(parse_columns(":right").is_err());
    }

    #[test]
    fn default_columns_follow_first_record() {
        let records = vec![Record::new().set("b", 1i64).set("a", 2i64)];
        let ids: Vec<String> = columns_from_records(&records)
            .iter()
            .map(|c| c.id().to_string())
            .collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(columns_from_records(&[]).is_empty());
    }
}
