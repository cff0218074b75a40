//! Small markup tree for the overview fragment.
//!
//! Tables, rows and cells are values; `Display` writes them out with balanced
//! tags. Text is written as-is, without escaping.

use std::fmt;

/// Named CSS colors used as cell backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssColor {
    Green,
    Cyan,
    Yellow,
    Orange,
    Red,
    Magenta,
}

impl CssColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Cyan => "cyan",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Magenta => "magenta",
        }
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    /// `<br>` followed by a newline.
    LineBreak,
    Newline,
    Heading(String),
    Table(Table),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    nodes: Vec<Node>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Node::Text(text.into()))
    }

    /// Text followed by `<br>`.
    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.text(text).push(Node::LineBreak)
    }

    pub fn line_break(&mut self) -> &mut Self {
        self.push(Node::LineBreak)
    }

    pub fn newline(&mut self) -> &mut Self {
        self.push(Node::Newline)
    }

    pub fn heading(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Node::Heading(text.into()))
    }

    pub fn table(&mut self, table: Table) -> &mut Self {
        self.push(Node::Table(table))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl From<Table> for Fragment {
    fn from(table: Table) -> Self {
        Self {
            nodes: vec![Node::Table(table)],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    border: Option<u32>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bordered(border: u32) -> Self {
        Self {
            border: Some(border),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Row) -> &mut Self {
        self.rows.push(row);
        self
    }

    pub fn with_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<Cell>,
    /// Emit a newline after `</tr>`.
    line_end: bool,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_cell(&mut self, cell: Cell) -> &mut Self {
        self.cells.push(cell);
        self
    }

    pub fn with_cell(mut self, cell: Cell) -> Self {
        self.cells.push(cell);
        self
    }

    pub fn ending_line(mut self) -> Self {
        self.line_end = true;
        self
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<Cell> for Row {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
            line_end: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    colspan: Option<u32>,
    background: Option<CssColor>,
    content: Fragment,
}

impl Cell {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn text(text: impl Into<String>) -> Self {
        let mut content = Fragment::new();
        content.text(text);
        Self::nested(content)
    }

    pub fn nested(content: impl Into<Fragment>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_colspan(mut self, colspan: u32) -> Self {
        self.colspan = Some(colspan);
        self
    }

    pub fn with_background(mut self, color: Option<CssColor>) -> Self {
        self.background = color;
        self
    }

    pub fn background(&self) -> Option<CssColor> {
        self.background
    }

    pub fn content(&self) -> &Fragment {
        &self.content
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.nodes
            .iter()
            .try_for_each(|node| fmt::Display::fmt(node, f))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::LineBreak => f.write_str("<br>\n"),
            Self::Newline => f.write_str("\n"),
            Self::Heading(text) => writeln!(f, "<h3>{text}</h3>"),
            Self::Table(table) => fmt::Display::fmt(table, f),
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.border {
            Some(border) => write!(f, "<table border='{border}'>")?,
            None => f.write_str("<table>")?,
        }
        self.rows
            .iter()
            .try_for_each(|row| fmt::Display::fmt(row, f))?;
        f.write_str("</table>")
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<tr>")?;
        self.cells
            .iter()
            .try_for_each(|cell| fmt::Display::fmt(cell, f))?;
        f.write_str("</tr>")?;
        if self.line_end {
            f.write_str("\n")?;
        }
        Ok(())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<td")?;
        if let Some(colspan) = self.colspan {
            write!(f, " colspan='{colspan}'")?;
        }
        if let Some(color) = self.background {
            write!(f, " style='background-color: {color}'")?;
        }
        write!(f, ">{}</td>", self.content)
    }
}
