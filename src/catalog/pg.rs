use super::Catalog;
use crate::error::Result;
use crate::fetcher::{Row, Value};
use postgres::types::Type;
use postgres::{Client, NoTls};

const BASE_TABLES_SQL: &str = "
    SELECT table_name::text
    FROM information_schema.tables
    WHERE table_schema = $1
    AND table_type = 'BASE TABLE'
    ORDER BY table_name
";

const TABLE_EXISTS_SQL: &str = "
    SELECT EXISTS (
        SELECT 1
        FROM information_schema.tables
        WHERE table_schema = $1
        AND table_name = $2
        AND table_type = 'BASE TABLE'
    )
";

/// Catalog backed by a blocking PostgreSQL connection.
pub struct PgCatalog {
    client: Client,
}

impl PgCatalog {
    pub fn connect(url: &str) -> Result<Self> {
        let client = Client::connect(url, NoTls)?;
        Ok(Self { client })
    }

    pub fn from_config(config: &postgres::Config) -> Result<Self> {
        let client = config.connect(NoTls)?;
        Ok(Self { client })
    }
}

impl Catalog for PgCatalog {
    fn base_tables(&mut self, schema: &str) -> Result<Vec<String>> {
        let rows = self.client.query(BASE_TABLES_SQL, &[&schema])?;
        rows.iter()
            .map(|r| r.try_get::<_, String>(0).map_err(Into::into))
            .collect()
    }

    fn table_exists(&mut self, schema: &str, table: &str) -> Result<bool> {
        let row = self.client.query_one(TABLE_EXISTS_SQL, &[&schema, &table])?;
        Ok(row.try_get(0)?)
    }

    fn fetch_rows(&mut self, schema: &str, table: &str) -> Result<Vec<Row>> {
        let relation = format!("{}.{}", quote_ident(schema), quote_ident(table));

        // Describe only; learns column names and types without reading data.
        let probe = self.client.prepare(&format!("SELECT * FROM {}", relation))?;
        let columns: Vec<(String, Type)> = probe
            .columns()
            .iter()
            .map(|c| (c.name().to_string(), c.type_().clone()))
            .collect();
        let Some((first, _)) = columns.first() else {
            return Ok(Vec::new());
        };

        let select_list = columns
            .iter()
            .map(|(name, ty)| {
                if *ty == Type::BOOL {
                    format!("t.{}", quote_ident(name))
                } else {
                    format!("t.{}::text", quote_ident(name))
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {} FROM {} AS t ORDER BY t.{}",
            select_list,
            relation,
            quote_ident(first)
        );

        let records = self.client.query(sql.as_str(), &[])?;
        let mut rows = Vec::with_capacity(records.len());
        for record in &records {
            let mut row = Row::new();
            for (idx, (name, ty)) in columns.iter().enumerate() {
                let value = if *ty == Type::BOOL {
                    Value::from(record.try_get::<_, Option<bool>>(idx)?)
                } else {
                    match record.try_get::<_, Option<String>>(idx)? {
                        None => Value::Null,
                        Some(text) if is_character_type(ty) => Value::Text(text),
                        Some(text) => Value::Other(text),
                    }
                };
                row.push(name.as_str(), value);
            }
            rows.push(row);
        }
        Ok(rows)
    }
}

fn is_character_type(ty: &Type) -> bool {
    [Type::TEXT, Type::VARCHAR, Type::BPCHAR, Type::NAME, Type::CHAR].contains(ty)
}

/// Quote an SQL identifier, doubling embedded double quotes.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
