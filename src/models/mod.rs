pub mod duty_cycle;
pub mod percentage;
pub mod pin;
pub mod presence_event;
