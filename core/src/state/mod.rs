mod record;

pub use record::CharacterRecord;
