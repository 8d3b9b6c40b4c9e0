//! `minic repl`: a read-eval-print loop over the interpreter core, using
//! the tracing demo evaluator and stdio platform.

use minic_core::Interpreter;

use crate::config::Config;
use crate::error::Result;
use crate::evaluator::TracingEvaluator;
use crate::platform::StdioPlatform;

#[derive(Debug, Clone, Default)]
pub struct ReplArgs;

pub struct ReplCommand {
    args: ReplArgs,
    config: Config,
}

impl ReplCommand {
    pub fn new(args: ReplArgs, config: Config) -> Self {
        Self { args, config }
    }

    pub fn run(&self) -> Result<()> {
        let mut interp = Interpreter::with_arena_capacity(
            Box::new(TracingEvaluator),
            Box::new(StdioPlatform),
            self.config.arena_bytes,
        );

        loop {
            let before = interp.interactive_lines().len();
            interp.parse_interactive_line("minic> ")?;
            let after = interp.interactive_lines().len();
            if after == before {
                break; // get_line returned None: end of input
            }
            // TracingEvaluator fully consumes each line on its own, so every
            // line but the one just parsed can be freed immediately.
            interp.interactive_lines().prune_before_cursor(after.saturating_sub(1));
        }
        Ok(())
    }
}
