use self::adapters::EmitToLoggingAdapter;

pub mod adapters;

pub struct EventLoggingModule {
    pub presence_event_adapter: EmitToLoggingAdapter,
}

impl EventLoggingModule {
    pub fn initialize() -> Self {
        Self {
            presence_event_adapter: EmitToLoggingAdapter {},
        }
    }
}
