use anyhow::Result;
use is_terminal::IsTerminal;
use lexeme_engine::SessionContext;
use std::path::Path;

use crate::config::Config;
use crate::export_target::{ExportTarget, FileTarget, SystemClipboard};
use crate::session::{ActionSet, Session};
use crate::ui::{LineSurface, TerminalSurface};

/// Run the menu loop. Arrow-key prompts on a terminal, numbered prompts otherwise.
pub fn handle(ctx: &SessionContext, config: &Config, output: Option<&Path>) -> Result<()> {
    let mut target: Box<dyn ExportTarget> = match output {
        Some(path) => Box::new(FileTarget::new(path)),
        None => Box::new(SystemClipboard::new()),
    };

    let actions = ActionSet::for_context(ctx);

    let stdout_is_tty = std::io::stdout().is_terminal();
    let styled = config.color && stdout_is_tty && std::env::var_os("NO_COLOR").is_none();

    if std::io::stdin().is_terminal() && stdout_is_tty {
        let mut surface = TerminalSurface::new(styled);
        Session::new(ctx, &mut surface, target.as_mut())
            .styled(styled)
            .run(&actions)
    } else {
        let mut surface = LineSurface::stdio();
        Session::new(ctx, &mut surface, target.as_mut()).run(&actions)
    }
}
