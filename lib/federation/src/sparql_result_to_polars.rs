use crate::errors::TableError;
use oxrdf::Term;
use polars::prelude::{DataFrame, NamedFrom, Series};
use sparesults::QuerySolution;

/// Lexical value of a term, without datatype, language tag or brackets.
pub fn term_to_raw_string(term: &Term) -> String {
    match term {
        Term::NamedNode(nn) => nn.as_str().to_string(),
        Term::BlankNode(bn) => bn.as_str().to_string(),
        Term::Literal(l) => l.value().to_string(),
        #[allow(unreachable_patterns)]
        _ => term.to_string(),
    }
}

/// Puts query solutions into a table of string columns named by `columns`.
///
/// The i-th value of each solution ends up in the i-th column, in the order the endpoint
/// returned the solutions. Unbound values are nulls.
pub fn solutions_to_dataframe(
    solutions: &[QuerySolution],
    columns: &[String],
) -> Result<DataFrame, TableError> {
    let mut column_values: Vec<Vec<Option<String>>> =
        vec![Vec::with_capacity(solutions.len()); columns.len()];
    for (row, solution) in solutions.iter().enumerate() {
        let values = solution.values();
        if values.len() != columns.len() {
            return Err(TableError::ColumnCountMismatch {
                row,
                expected: columns.len(),
                found: values.len(),
            });
        }
        for (i, value) in values.iter().enumerate() {
            column_values[i].push(value.as_ref().map(term_to_raw_string));
        }
    }

    let series_vec: Vec<Series> = columns
        .iter()
        .zip(column_values)
        .map(|(name, values)| Series::new(name, values))
        .collect();
    Ok(DataFrame::new(series_vec)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::{BlankNode, Literal, NamedNode, Variable};
    use oxrdf::vocab::xsd;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn solution(values: Vec<Option<Term>>) -> QuerySolution {
        let variables: Vec<Variable> = (0..values.len())
            .map(|i| Variable::new(format!("v{}", i)).unwrap())
            .collect();
        QuerySolution::from((variables, values))
    }

    #[test]
    fn test_rows_in_binding_order_with_raw_values() {
        let solutions = vec![
            solution(vec![
                Some(NamedNode::new("https://example.org/p2").unwrap().into()),
                Some(Literal::new_typed_literal("355", xsd::INTEGER).into()),
            ]),
            solution(vec![
                Some(NamedNode::new("https://example.org/p1").unwrap().into()),
                Some(Literal::new_language_tagged_literal("Stahl", "de").unwrap().into()),
            ]),
        ];
        let df = solutions_to_dataframe(&solutions, &columns(&["URI", "value"])).unwrap();
        assert_eq!(df.width(), 2);
        assert_eq!(df.height(), 2);
        assert_eq!(df.get_column_names(), vec!["URI", "value"]);
        let uris = df.column("URI").unwrap().str().unwrap();
        assert_eq!(uris.get(0), Some("https://example.org/p2"));
        assert_eq!(uris.get(1), Some("https://example.org/p1"));
        let values = df.column("value").unwrap().str().unwrap();
        assert_eq!(values.get(0), Some("355"));
        assert_eq!(values.get(1), Some("Stahl"));
    }

    #[test]
    fn test_unbound_values_are_null() {
        let solutions = vec![solution(vec![
            Some(BlankNode::new("b0").unwrap().into()),
            None,
        ])];
        let df = solutions_to_dataframe(&solutions, &columns(&["a", "b"])).unwrap();
        assert_eq!(df.column("a").unwrap().str().unwrap().get(0), Some("b0"));
        assert_eq!(df.column("b").unwrap().null_count(), 1);
    }

    #[test]
    fn test_no_solutions_gives_empty_table_with_columns() {
        let df = solutions_to_dataframe(&[], &columns(&["URI", "URL"])).unwrap();
        assert_eq!(df.width(), 2);
        assert_eq!(df.height(), 0);
    }

    #[test]
    fn test_column_count_mismatch() {
        let solutions = vec![solution(vec![Some(
            NamedNode::new("https://example.org/p1").unwrap().into(),
        )])];
        let err = solutions_to_dataframe(&solutions, &columns(&["URI", "value"])).unwrap_err();
        assert!(matches!(
            err,
            TableError::ColumnCountMismatch {
                row: 0,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_duplicate_column_names_are_rejected() {
        let solutions = vec![solution(vec![
            Some(Literal::new_simple_literal("a").into()),
            Some(Literal::new_simple_literal("b").into()),
        ])];
        let err = solutions_to_dataframe(&solutions, &columns(&["x", "x"])).unwrap_err();
        assert!(matches!(err, TableError::PolarsError(_)));
    }
}
