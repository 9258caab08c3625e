use tracing::info;

use crate::{internals::core::ports::PresenceEventPort, models::presence_event::PresenceEvent};

pub struct EmitToLoggingAdapter;

impl PresenceEventPort for EmitToLoggingAdapter {
    fn emit(&self, event: PresenceEvent) {
        info!("{}", event);
    }
}
