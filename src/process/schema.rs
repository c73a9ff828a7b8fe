use arrow::datatypes::{DataType, Field, Schema};

/// Numeric inferred types are kept; anything else is read back as text so the
/// cell contents survive untouched. A column with no values stays `Null` and
/// is treated as numeric when filled.
pub fn column_type(inferred: &DataType) -> DataType {
    match inferred {
        DataType::Int64 => DataType::Int64,
        DataType::Float64 => DataType::Float64,
        DataType::Null => DataType::Null,
        _ => DataType::Utf8,
    }
}

/// Schema used to read the full table, derived from the inferred one.
pub fn table_schema(inferred: &Schema) -> Schema {
    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .map(|f| Field::new(f.name(), column_type(f.data_type()), true))
        .collect();
    Schema::new(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::TimeUnit;

    #[test]
    fn test_non_numeric_types_become_text() {
        assert_eq!(column_type(&DataType::Boolean), DataType::Utf8);
        assert_eq!(column_type(&DataType::Date32), DataType::Utf8);
        assert_eq!(
            column_type(&DataType::Timestamp(TimeUnit::Second, None)),
            DataType::Utf8
        );
        assert_eq!(column_type(&DataType::Int64), DataType::Int64);
        assert_eq!(column_type(&DataType::Float64), DataType::Float64);
        assert_eq!(column_type(&DataType::Null), DataType::Null);
    }

    #[test]
    fn test_table_schema_keeps_names_and_order() {
        let inferred = Schema::new(vec![
            Field::new("N°DPE", DataType::Utf8, true),
            Field::new("Date réception DPE", DataType::Date32, true),
            Field::new("Année construction", DataType::Float64, true),
        ]);
        let schema = table_schema(&inferred);
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, ["N°DPE", "Date réception DPE", "Année construction"]);
        assert_eq!(schema.field(1).data_type(), &DataType::Utf8);
        assert!(schema.fields().iter().all(|f| f.is_nullable()));
    }
}
