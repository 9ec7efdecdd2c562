//! Interactive session: a menu of actions over one loaded workbook.
//!
//! The summary is shown once, then the user picks actions until Quit or the
//! input closes. A failing action is reported and the menu comes back.

use anyhow::Result;
use lexeme_engine::{SessionContext, export};
use tracing::{debug, warn};

use crate::export_target::ExportTarget;
use crate::render;
use crate::ui::{Surface, is_cancelled, is_end_of_input};

const MENU_TITLE: &str = "What next?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Terminate,
}

pub type Handler = fn(&mut Session<'_>) -> Result<Outcome>;

#[derive(Clone, Copy)]
pub struct ActionSpec {
    pub label: &'static str,
    pub handler: Handler,
}

/// Ordered menu of actions.
#[derive(Clone)]
pub struct ActionSet {
    actions: Vec<ActionSpec>,
}

impl ActionSet {
    pub fn new(actions: Vec<ActionSpec>) -> Self {
        Self { actions }
    }

    /// Every action.
    pub fn standard() -> Self {
        Self::new(vec![
            SHOW_SUMMARY,
            EXPORT_ALL,
            EXPORT_CATEGORY,
            SEARCH_WORD,
            SEARCH_CATEGORY,
            QUIT,
        ])
    }

    /// Everything except the poem searches.
    pub fn without_search() -> Self {
        Self::new(vec![SHOW_SUMMARY, EXPORT_ALL, EXPORT_CATEGORY, QUIT])
    }

    /// The menu for a loaded workbook: searches only when it has poems.
    pub fn for_context(ctx: &SessionContext) -> Self {
        if ctx.poems().is_empty() {
            Self::without_search()
        } else {
            Self::standard()
        }
    }

    pub fn labels(&self) -> Vec<String> {
        self.actions.iter().map(|a| a.label.to_string()).collect()
    }

    pub fn get(&self, index: usize) -> Option<&ActionSpec> {
        self.actions.get(index)
    }

}

pub const SHOW_SUMMARY: ActionSpec = ActionSpec {
    label: "Show summary",
    handler: show_summary,
};
pub const EXPORT_ALL: ActionSpec = ActionSpec {
    label: "Export summary",
    handler: export_all,
};
pub const EXPORT_CATEGORY: ActionSpec = ActionSpec {
    label: "Export category",
    handler: export_category,
};
pub const SEARCH_WORD: ActionSpec = ActionSpec {
    label: "Search by word",
    handler: search_word,
};
pub const SEARCH_CATEGORY: ActionSpec = ActionSpec {
    label: "Search by category",
    handler: search_category,
};
pub const QUIT: ActionSpec = ActionSpec {
    label: "Quit",
    handler: quit,
};

pub struct Session<'a> {
    ctx: &'a SessionContext,
    surface: &'a mut dyn Surface,
    target: &'a mut dyn ExportTarget,
    styled: bool,
}

impl<'a> Session<'a> {
    pub fn new(
        ctx: &'a SessionContext,
        surface: &'a mut dyn Surface,
        target: &'a mut dyn ExportTarget,
    ) -> Self {
        Self {
            ctx,
            surface,
            target,
            styled: false,
        }
    }

    /// Style console output (colors, dimmed counts). Exports are never styled.
    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    /// Show the summary, then loop over the menu until an action terminates.
    pub fn run(&mut self, actions: &ActionSet) -> Result<()> {
        show_summary(self)?;
        let labels = actions.labels();

        loop {
            self.surface.print("");
            let choice = match self.surface.select(MENU_TITLE, &labels) {
                Ok(choice) => choice,
                Err(err) if is_cancelled(&err) => continue,
                Err(err) if is_end_of_input(&err) => break,
                Err(err) => return Err(err),
            };

            let Some(action) = actions.get(choice) else {
                continue;
            };
            debug!(action = action.label, "running action");

            match (action.handler)(self) {
                Ok(Outcome::Continue) => {}
                Ok(Outcome::Terminate) => break,
                Err(err) if is_cancelled(&err) => {
                    debug!(action = action.label, "action cancelled");
                }
                Err(err) if is_end_of_input(&err) => break,
                Err(err) => {
                    warn!(action = action.label, error = %err, "action failed");
                    self.surface.error(&format!("Error: {:#}", err));
                }
            }
        }

        self.surface.print("Exiting ...");
        Ok(())
    }
}

fn show_summary(session: &mut Session<'_>) -> Result<Outcome> {
    let table = render::summary_table(
        &session.ctx.summary_order(),
        session.styled,
        session.surface.width(),
    );
    session.surface.print(&table);
    Ok(Outcome::Continue)
}

fn export_all(session: &mut Session<'_>) -> Result<Outcome> {
    let text = export::render_summary(session.ctx.categories(), false);
    session.target.put(&text)?;
    let message = format!("Summary copied to {}", session.target.describe());
    session.surface.print(&message);
    Ok(Outcome::Continue)
}

fn category_names(session: &Session<'_>) -> Vec<String> {
    session
        .ctx
        .lexical_order()
        .into_iter()
        .map(|c| c.name.clone())
        .collect()
}

fn export_category(session: &mut Session<'_>) -> Result<Outcome> {
    let ctx = session.ctx;
    let names = category_names(session);
    if names.is_empty() {
        session.surface.print("No categories found.");
        return Ok(Outcome::Continue);
    }

    let choice = session.surface.select("Choose a category", &names)?;
    let Some(category) = names.get(choice).and_then(|name| ctx.category(name)) else {
        session.surface.error("Category not found");
        return Ok(Outcome::Continue);
    };

    session
        .target
        .put(&export::render_category_entries(category))?;
    let message = format!(
        "Category '{}' copied to {}",
        category.name,
        session.target.describe()
    );
    session.surface.print(&message);
    Ok(Outcome::Continue)
}

fn search_word(session: &mut Session<'_>) -> Result<Outcome> {
    let ctx = session.ctx;
    let styled = session.styled;
    let query = session.surface.input("Which word are we looking for?")?;

    if let Some(categories) = ctx.find_entry_categories(&query) {
        let mut lines = vec![String::new(), render::heading("Categories", styled)];
        lines.extend(categories.iter().cloned());
        session.surface.print(&lines.join("\n"));
    }

    let poems = ctx.find_poems_containing_word(&query);
    if poems.is_empty() {
        session.surface.print("Nothing found");
    } else {
        let mut lines = vec![String::new(), render::heading("Search results", styled)];
        lines.extend(poems.iter().map(|p| p.to_string()));
        session.surface.print(&lines.join("\n"));
    }

    Ok(Outcome::Continue)
}

fn search_category(session: &mut Session<'_>) -> Result<Outcome> {
    let ctx = session.ctx;
    let names = category_names(session);
    if names.is_empty() {
        session.surface.print("No categories found.");
        return Ok(Outcome::Continue);
    }

    let picked = session.surface.multi_select("Choose categories", &names)?;
    let selected: Vec<&str> = picked
        .iter()
        .filter_map(|&i| names.get(i).map(String::as_str))
        .collect();

    let result = ctx.find_poems_by_category(&selected);
    if result.is_empty() {
        session.surface.print("Nothing found");
    } else {
        let text = render::category_search(&result, session.styled);
        session.surface.print(&text);
    }

    Ok(Outcome::Continue)
}

fn quit(_session: &mut Session<'_>) -> Result<Outcome> {
    Ok(Outcome::Terminate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export_target::MemoryTarget;
    use crate::ui::LineSurface;
    use anyhow::bail;
    use lexeme_types::{Entry, Poem, PoemWord};
    use std::io::Cursor;

    type TestSurface = LineSurface<Cursor<Vec<u8>>, Vec<u8>, Vec<u8>>;

    fn context() -> SessionContext {
        SessionContext::new(
            vec![
                Entry::new("кот", 5, ["животные"]),
                Entry::new("пес", 3, ["животные"]),
                Entry::new("стол", 2, ["мебель"]),
            ],
            vec![
                Poem::new(
                    "Зимнее утро",
                    vec![PoemWord::new("котик", 2), PoemWord::new("стол", 1)],
                ),
                Poem::new(
                    "Прогулка",
                    vec![PoemWord::new("пес", 4), PoemWord::new("кот", 1)],
                ),
            ],
        )
    }

    fn surface(script: &str) -> TestSurface {
        LineSurface::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), Vec::new())
    }

    struct Run {
        output: String,
        errors: String,
        target: MemoryTarget,
    }

    fn run_script(script: &str, actions: &ActionSet) -> Run {
        let ctx = context();
        let mut ui = surface(script);
        let mut target = MemoryTarget::new();

        Session::new(&ctx, &mut ui, &mut target)
            .run(actions)
            .unwrap();

        Run {
            output: String::from_utf8_lossy(ui.output()).to_string(),
            errors: String::from_utf8_lossy(ui.errors()).to_string(),
            target,
        }
    }

    #[test]
    fn test_summary_shown_before_first_prompt() {
        let run = run_script("6\n", &ActionSet::standard());

        let table = run.output.find("животные").unwrap();
        let menu = run.output.find(MENU_TITLE).unwrap();
        assert!(table < menu);
        assert!(run.output.trim_end().ends_with("Exiting ..."));
        assert!(run.target.exports.is_empty());
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let run = run_script("", &ActionSet::standard());
        assert!(run.output.contains("Exiting ..."));
    }

    #[test]
    fn test_export_all_is_plain_tsv() {
        let run = run_script("2\n6\n", &ActionSet::standard());

        assert_eq!(
            run.target.last(),
            Some("животные\t2\t8\tкот(5), пес(3)\nмебель\t1\t2\tстол(2)")
        );
        assert!(run.output.contains("Summary copied to memory"));
    }

    #[test]
    fn test_export_category_uses_lexical_picker() {
        // 1) животные 2) мебель
        let run = run_script("3\n2\n6\n", &ActionSet::standard());

        assert_eq!(run.target.last(), Some("стол\t2"));
        assert!(run.output.contains("Category 'мебель' copied to memory"));
    }

    #[test]
    fn test_search_word_shows_categories_and_poems() {
        let run = run_script("4\nКот\n6\n", &ActionSet::standard());

        assert!(run.output.contains("Categories\nживотные"));
        assert!(run.output.contains("Search results\nЗимнее утро\nПрогулка"));
    }

    #[test]
    fn test_search_word_without_hits() {
        let run = run_script("4\nлиса\n6\n", &ActionSet::standard());

        assert!(!run.output.contains("Categories"));
        assert!(run.output.contains("Nothing found"));
    }

    #[test]
    fn test_search_category_groups_results() {
        let run = run_script("5\n1 2\n6\n", &ActionSet::standard());

        assert!(run.output.contains("Прогулка\n  животные\n    пес(4)\n    кот(1)"));
        assert!(run.output.contains("Зимнее утро\n  мебель\n    стол(1)"));
    }

    #[test]
    fn test_search_category_with_no_selection() {
        let run = run_script("5\n\n6\n", &ActionSet::standard());
        assert!(run.output.contains("Nothing found"));
    }

    #[test]
    fn test_cancelled_prompt_returns_to_menu() {
        // Back out of the category picker, then export мебель
        let run = run_script("3\n\n3\n2\n6\n", &ActionSet::standard());

        assert_eq!(run.target.exports, vec!["стол\t2"]);
        assert!(run.errors.is_empty());
        assert_eq!(run.output.matches(MENU_TITLE).count(), 3);
        assert!(run.output.contains("Exiting ..."));
    }

    #[test]
    fn test_empty_menu_answer_shows_menu_again() {
        let run = run_script("\n6\n", &ActionSet::standard());

        assert_eq!(run.output.matches(MENU_TITLE).count(), 2);
        assert!(run.errors.is_empty());
    }

    #[test]
    fn test_menu_without_poems_keeps_category_export() {
        let ctx = SessionContext::new(vec![Entry::new("стол", 2, ["мебель"])], Vec::new());
        let actions = ActionSet::for_context(&ctx);
        assert_eq!(
            actions.labels(),
            ["Show summary", "Export summary", "Export category", "Quit"]
        );
        assert_eq!(ActionSet::for_context(&context()).labels().len(), 6);

        let mut ui = surface("3\n1\n4\n");
        let mut target = MemoryTarget::new();
        Session::new(&ctx, &mut ui, &mut target).run(&actions).unwrap();

        assert_eq!(target.last(), Some("стол\t2"));
        let output = String::from_utf8_lossy(ui.output()).to_string();
        assert!(!output.contains("Search by word"));
    }

    fn failing(_session: &mut Session<'_>) -> Result<Outcome> {
        bail!("clipboard unavailable")
    }

    #[test]
    fn test_failed_action_keeps_loop_running() {
        let actions = ActionSet::new(vec![
            ActionSpec {
                label: "Fail",
                handler: failing,
            },
            QUIT,
        ]);
        let run = run_script("1\n1\n2\n", &actions);

        assert_eq!(run.errors.matches("Error: clipboard unavailable").count(), 2);
        assert!(run.output.contains("Exiting ..."));
    }
}
