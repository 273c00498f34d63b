//! Text rendering of the search page
//!
//! Render types are plain snapshots with no references into the page, so a
//! frontend can hold them across awaits. [`PageView`] implements `Display`
//! for terminal output.

use busline_model::{Category, RecordId};
use std::fmt::{self, Display, Formatter};

pub const TITLE: &str = "Bus Search";
pub const SUBTITLE: &str = "Search items by bus line";
pub const LOADING_LINES: &str = "Loading buses...";
pub const SELECT_PLACEHOLDER: &str = "Select a bus...";
pub const NO_LINES: &str = "No bus lines available";
pub const PROMPT: &str = "Select a bus line to search";
pub const LOADING_ITEMS: &str = "Loading items...";
pub const NO_ITEMS: &str = "No items found for this bus line";
pub const DEGRADED_HINT: &str = "(could not load items; select the line again to retry)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOption {
    pub category: Category,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorView {
    Loading,
    Choice {
        selected: Option<Category>,
        options: Vec<SelectorOption>,
        degraded: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuView {
    Closed,
    Open,
    Deleting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// 1-based position in the table
    pub index: usize,
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub menu: MenuView,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    Prompt,
    Loading,
    Empty { degraded: bool },
    Table { rows: Vec<RowView>, has_more: bool },
}

/// Snapshot of the whole page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub selector: SelectorView,
    pub results: ResultsView,
}

impl Display for SelectorView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => writeln!(f, "{LOADING_LINES}"),
            Self::Choice {
                selected,
                options,
                degraded,
            } => {
                let current = selected.as_ref().map_or(SELECT_PLACEHOLDER, Category::as_str);
                writeln!(f, "Bus line: [{current}]")?;
                if options.is_empty() || *degraded {
                    return writeln!(f, "  {NO_LINES}");
                }
                let names: Vec<String> = options
                    .iter()
                    .map(|o| {
                        if o.selected {
                            format!("*{}", o.category)
                        } else {
                            o.category.to_string()
                        }
                    })
                    .collect();
                writeln!(f, "  Lines: {}", names.join(", "))
            }
        }
    }
}

impl Display for MenuView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Closed => "⋮",
            Self::Open => "[Delete]",
            Self::Deleting => "[Deleting...]",
        })
    }
}

impl Display for ResultsView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prompt => writeln!(f, "{PROMPT}"),
            Self::Loading => writeln!(f, "{LOADING_ITEMS}"),
            Self::Empty { degraded } => {
                writeln!(f, "{NO_ITEMS}")?;
                if *degraded {
                    writeln!(f, "{DEGRADED_HINT}")?;
                }
                Ok(())
            }
            Self::Table { rows, has_more } => {
                let title_w = column_width("Title", rows.iter().map(|r| r.title.as_str()));
                let desc_w = column_width("Description", rows.iter().map(|r| r.description.as_str()));
                writeln!(f, "{:>3}  {:<36}  {:<title_w$}  {:<desc_w$}", "#", "ID", "Title", "Description")?;
                for row in rows {
                    writeln!(
                        f,
                        "{:>3}  {:<36}  {:<title_w$}  {:<desc_w$}  {}",
                        row.index, row.id, row.title, row.description, row.menu
                    )?;
                    if let Some(error) = &row.error {
                        writeln!(f, "     ! {error}")?;
                    }
                }
                if *has_more {
                    writeln!(f, "  ...more items on the next page")?;
                }
                Ok(())
            }
        }
    }
}

impl Display for PageView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TITLE}")?;
        writeln!(f, "{SUBTITLE}")?;
        writeln!(f)?;
        write!(f, "{}", self.selector)?;
        writeln!(f)?;
        write!(f, "{}", self.results)
    }
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|cell| cell.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn selector_lists_lines_and_marks_choice() {
        let view = SelectorView::Choice {
            selected: Some(Category::new("34")),
            options: vec![
                SelectorOption {
                    category: Category::new("12"),
                    selected: false,
                },
                SelectorOption {
                    category: Category::new("34"),
                    selected: true,
                },
            ],
            degraded: false,
        };
        assert_eq!(view.to_string(), "Bus line: [34]\n  Lines: 12, *34\n");
    }

    #[test]
    fn degraded_selector_shows_empty_set() {
        let view = SelectorView::Choice {
            selected: None,
            options: Vec::new(),
            degraded: true,
        };
        assert_eq!(
            view.to_string(),
            format!("Bus line: [{SELECT_PLACEHOLDER}]\n  {NO_LINES}\n")
        );
    }

    #[test]
    fn empty_results_are_explicit() {
        assert_eq!(ResultsView::Empty { degraded: false }.to_string(), format!("{NO_ITEMS}\n"));
        assert!(ResultsView::Empty { degraded: true }
            .to_string()
            .contains(DEGRADED_HINT));
    }

    #[test]
    fn table_has_one_line_per_row() {
        let rows = (1..=2)
            .map(|index| RowView {
                index,
                id: RecordId::new(),
                title: format!("item {index}"),
                description: String::new(),
                menu: if index == 2 { MenuView::Open } else { MenuView::Closed },
                error: None,
            })
            .collect();
        let text = ResultsView::Table {
            rows,
            has_more: false,
        }
        .to_string();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with('⋮'));
        assert!(lines[2].ends_with("[Delete]"));
    }
}
