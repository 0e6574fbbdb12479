pub mod schema;

pub use schema::{
    ChoreographyConfig, CinematicConfig, Config, GateConfig, GiftConfig, RewardVariant,
    UNCONFIGURED_ENDPOINT,
};
