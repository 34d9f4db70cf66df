//! ---
//! rome_section: "01-core-functionality"
//! rome_subsection: "module"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "Standardised build events emitted by the generator front-end."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
use tracing::Level;

/// Schema context attached to a build event.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LogContext<'a> {
    pub schema: Option<&'a str>,
    pub message: Option<&'a str>,
    pub id: Option<u8>,
}

impl<'a> LogContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(mut self, schema: &'a str) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_message(mut self, message: &'a str) -> Self {
        self.message = Some(message);
        self
    }

    pub fn with_id(mut self, id: u8) -> Self {
        self.id = Some(id);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildEventOutcome {
    Success,
    Fault,
}

impl BuildEventOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildEventOutcome::Success => "success",
            BuildEventOutcome::Fault => "fault",
        }
    }

    fn level(&self) -> Level {
        match self {
            BuildEventOutcome::Success => Level::INFO,
            BuildEventOutcome::Fault => Level::ERROR,
        }
    }
}

/// Emit a build event with a success/fault outcome.
///
/// `tracing::event!` needs a constant level, hence the match.
pub fn log_build_event(
    context: Option<&LogContext>,
    event: &str,
    message: &str,
    outcome: BuildEventOutcome,
) {
    let ctx = context.cloned().unwrap_or_default();
    let id = ctx.id.map(|id| format!("0x{id:02X}")).unwrap_or_default();
    macro_rules! emit {
        ($level:expr) => {
            tracing::event!(
                $level,
                event,
                outcome = outcome.as_str(),
                schema = ctx.schema.unwrap_or(""),
                rome_message = ctx.message.unwrap_or(""),
                id = %id,
                message = %message
            )
        };
    }
    match outcome.level() {
        Level::ERROR => emit!(Level::ERROR),
        _ => emit!(Level::INFO),
    }
}
