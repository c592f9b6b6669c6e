//! Typed fragments of a generated seeder class.
//!
//! Each node renders itself into a [`CodeWriter`] at the writer's current
//! depth, so fragments can be rendered and checked in isolation.

use super::code::CodeWriter;
use super::value::{format_value, quote};
use crate::fetcher::{Row, TableData};

pub trait Render {
    fn render(&self, w: &mut CodeWriter);

    fn render_to_string(&self) -> String {
        let mut w = CodeWriter::new();
        self.render(&mut w);
        w.finish()
    }
}

/// File header: opening tag, namespace and imports.
#[derive(Debug, Clone)]
pub struct Preamble<'a> {
    pub namespace: &'a str,
}

impl Render for Preamble<'_> {
    fn render(&self, w: &mut CodeWriter) {
        w.line("<?php");
        w.blank();
        w.line(format!("namespace {};", self.namespace));
        w.blank();
        w.line("use Illuminate\\Database\\Seeder;");
        w.line("use Illuminate\\Support\\Facades\\DB;");
    }
}

/// `DB::table('<t>')->truncate();`
#[derive(Debug, Clone, Copy)]
pub struct Truncate<'a> {
    pub table: &'a str,
}

impl Render for Truncate<'_> {
    fn render(&self, w: &mut CodeWriter) {
        w.line(format!("DB::table({})->truncate();", quote(self.table)));
    }
}

/// Progress line printed by the seeder while it runs.
#[derive(Debug, Clone, Copy)]
pub struct Info<'a> {
    pub message: &'a str,
}

impl Render for Info<'_> {
    fn render(&self, w: &mut CodeWriter) {
        w.line(format!("$this->command->info({});", quote(self.message)));
    }
}

/// Seeds one table: a comment, a progress line and the insert call(s).
#[derive(Debug, Clone, Copy)]
pub struct Insert<'a> {
    pub table: &'a TableData,
    /// Rows per `insert()` call; `None` emits a single call.
    pub chunk_size: Option<usize>,
}

impl Insert<'_> {
    fn chunks(&self) -> Vec<&[Row]> {
        match self.chunk_size {
            Some(size) if size > 0 => self.table.rows.chunks(size).collect(),
            _ => vec![self.table.rows.as_slice()],
        }
    }
}

impl Render for Insert<'_> {
    fn render(&self, w: &mut CodeWriter) {
        let name = &self.table.name;
        let count = self.table.record_count();
        w.line(format!("// Seed {} ({} records)", comment_text(name), count));
        w.line(format!(
            "$this->command->info({} . ' ({} records)');",
            quote(name),
            count
        ));
        for chunk in self.chunks() {
            w.block(&format!("DB::table({})->insert([", quote(name)), "]);", |w| {
                for row in chunk {
                    w.line(format!("{},", row_literal(row)));
                }
            });
        }
    }
}

/// Text safe inside a `//` comment: PHP ends those at a newline or `?>`.
fn comment_text(text: &str) -> String {
    text.replace(['\r', '\n'], " ").replace("?>", "? >")
}

/// `['col' => value, ...]`
pub fn row_literal(row: &Row) -> String {
    let fields: Vec<String> = row
        .iter()
        .map(|(column, value)| format!("{} => {}", quote(column), format_value(value)))
        .collect();
    format!("[{}]", fields.join(", "))
}

/// All inserts, inside one transaction with constraints deferred to commit.
#[derive(Debug, Clone)]
pub struct TransactionBlock<'a> {
    pub inserts: Vec<Insert<'a>>,
}

impl Render for TransactionBlock<'_> {
    fn render(&self, w: &mut CodeWriter) {
        w.block("DB::transaction(function () {", "});", |w| {
            w.line("// Defer all deferrable constraints for the current transaction");
            w.line("DB::statement('SET CONSTRAINTS ALL DEFERRED');");
            for insert in &self.inserts {
                w.blank();
                insert.render(w);
            }
        });
    }
}

/// The seeder class with its `run()` method.
#[derive(Debug, Clone)]
pub struct SeederClass<'a> {
    pub name: String,
    pub generated_on: &'a str,
    pub truncates: Vec<Truncate<'a>>,
    pub transaction: TransactionBlock<'a>,
}

impl Render for SeederClass<'_> {
    fn render(&self, w: &mut CodeWriter) {
        w.line(format!("class {} extends Seeder", self.name));
        w.block("{", "}", |w| {
            w.line("/**");
            w.line(" * Run the database seeds.");
            w.line(format!(" * Generated on: {}", self.generated_on));
            w.line(" */");
            w.line("public function run(): void");
            w.block("{", "}", |w| {
                Info { message: "started!" }.render(w);
                w.blank();
                for truncate in &self.truncates {
                    truncate.render(w);
                }
                w.blank();
                self.transaction.render(w);
                w.blank();
                Info { message: "ended!" }.render(w);
            });
        });
    }
}

/// A complete seeder source file.
#[derive(Debug, Clone)]
pub struct SeederFile<'a> {
    pub preamble: Preamble<'a>,
    pub class: SeederClass<'a>,
}

impl Render for SeederFile<'_> {
    fn render(&self, w: &mut CodeWriter) {
        self.preamble.render(w);
        w.blank();
        self.class.render(w);
    }
}
