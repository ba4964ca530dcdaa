//! Conversions between criteria values and PostgreSQL wire types.

use std::error::Error;

use ::postgres::types::{to_sql_checked, IsNull, ToSql, Type};
use ::postgres::Row as PgRow;
use bytes::BytesMut;

use crate::db::{Params, Value};

/// Rewrite named placeholders (`:p_0`) into PostgreSQL positional ones (`$1`).
///
/// Returns the rewritten SQL and the parameter names in positional order.
/// A name that appears more than once reuses its first position. Text inside
/// single-quoted literals and double-quoted identifiers is left untouched, as
/// is any prefixed word that is not a registered parameter (so `::text` casts
/// survive).
pub fn rewrite_placeholders(sql: &str, prefix: &str, params: &Params) -> (String, Vec<String>) {
    let mut out = String::with_capacity(sql.len());
    let mut order: Vec<String> = Vec::new();
    let mut quote: Option<char> = None;
    let mut rest = sql;

    while let Some(c) = rest.chars().next() {
        if let Some(q) = quote {
            out.push(c);
            rest = &rest[c.len_utf8()..];
            if c == q {
                quote = None;
            }
            continue;
        }

        if c == '\'' || c == '"' {
            quote = Some(c);
            out.push(c);
            rest = &rest[1..];
            continue;
        }

        if !prefix.is_empty() && rest.starts_with(prefix) {
            let after = &rest[prefix.len()..];
            let name_len = after
                .char_indices()
                .find(|(_, ch)| !(ch.is_ascii_alphanumeric() || *ch == '_'))
                .map(|(i, _)| i)
                .unwrap_or(after.len());
            let name = &after[..name_len];
            if !name.is_empty() && params.contains_key(name) {
                let position = match order.iter().position(|n| n == name) {
                    Some(i) => i + 1,
                    None => {
                        order.push(name.to_string());
                        order.len()
                    }
                };
                out.push('$');
                out.push_str(&position.to_string());
                rest = &after[name_len..];
                continue;
            }
        }

        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    (out, order)
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(b) => b.to_sql(ty, out),
            Value::Int(i) => {
                if *ty == Type::INT2 {
                    i16::try_from(*i)?.to_sql(ty, out)
                } else if *ty == Type::INT4 {
                    i32::try_from(*i)?.to_sql(ty, out)
                } else if *ty == Type::FLOAT4 {
                    (*i as f32).to_sql(ty, out)
                } else if *ty == Type::FLOAT8 {
                    (*i as f64).to_sql(ty, out)
                } else if *ty == Type::TEXT || *ty == Type::VARCHAR {
                    i.to_string().to_sql(ty, out)
                } else {
                    i.to_sql(ty, out)
                }
            }
            Value::Float(f) => {
                if *ty == Type::FLOAT4 {
                    (*f as f32).to_sql(ty, out)
                } else {
                    f.to_sql(ty, out)
                }
            }
            Value::Str(s) => s.as_str().to_sql(ty, out),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

/// Convert a PostgreSQL row into criteria values, column by column.
///
/// Types without a scalar mapping are read as text when the server can
/// provide it and as NULL otherwise.
pub fn row_values(row: &PgRow) -> Vec<Value> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let ty = column.type_();
            if *ty == Type::BOOL {
                Value::from(row.try_get::<_, Option<bool>>(i).ok().flatten())
            } else if *ty == Type::INT2 {
                row.try_get::<_, Option<i16>>(i)
                    .ok()
                    .flatten()
                    .map(|v| Value::Int(i64::from(v)))
                    .unwrap_or(Value::Null)
            } else if *ty == Type::INT4 {
                Value::from(row.try_get::<_, Option<i32>>(i).ok().flatten())
            } else if *ty == Type::INT8 {
                Value::from(row.try_get::<_, Option<i64>>(i).ok().flatten())
            } else if *ty == Type::FLOAT4 {
                row.try_get::<_, Option<f32>>(i)
                    .ok()
                    .flatten()
                    .map(|v| Value::Float(f64::from(v)))
                    .unwrap_or(Value::Null)
            } else if *ty == Type::FLOAT8 {
                Value::from(row.try_get::<_, Option<f64>>(i).ok().flatten())
            } else {
                Value::from(row.try_get::<_, Option<String>>(i).ok().flatten())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn params(names: &[&str]) -> Params {
        names
            .iter()
            .map(|n| (n.to_string(), Value::Int(0)))
            .collect()
    }

    #[rstest]
    fn test_rewrite_in_order_of_appearance() {
        let (sql, order) = rewrite_placeholders(
            "SELECT * FROM t WHERE a > :p_1 AND b < :p_0",
            ":",
            &params(&["p_0", "p_1"]),
        );
        assert_eq!(sql, "SELECT * FROM t WHERE a > $1 AND b < $2");
        assert_eq!(order, vec!["p_1".to_string(), "p_0".to_string()]);
    }

    #[rstest]
    fn test_rewrite_reuses_position_for_repeated_name() {
        let (sql, order) = rewrite_placeholders("a = :x OR b = :x", ":", &params(&["x"]));
        assert_eq!(sql, "a = $1 OR b = $1");
        assert_eq!(order.len(), 1);
    }

    #[rstest]
    fn test_rewrite_skips_quoted_text_and_casts() {
        let (sql, order) = rewrite_placeholders(
            "SELECT ':p_0', \"a:p_0\", x::text FROM t WHERE y = :p_0",
            ":",
            &params(&["p_0"]),
        );
        assert_eq!(sql, "SELECT ':p_0', \"a:p_0\", x::text FROM t WHERE y = $1");
        assert_eq!(order, vec!["p_0".to_string()]);
    }

    #[rstest]
    fn test_rewrite_leaves_unknown_names() {
        let (sql, order) = rewrite_placeholders("x::int = :p_10", ":", &params(&["p_1"]));
        assert_eq!(sql, "x::int = :p_10");
        assert!(order.is_empty());
    }
}
