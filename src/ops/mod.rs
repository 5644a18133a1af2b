pub mod cursor;
pub mod events;
pub mod projector;
pub mod store;
pub mod typeahead;
