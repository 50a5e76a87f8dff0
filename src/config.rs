//! Rules constants and runtime settings.

use crate::ship::ShipKind;

/// Width and height of the square grid.
pub const GRID_SIZE: usize = 8;
pub const FLEET_SIZE: usize = 4;
/// The fleet in placement order.
pub const FLEET: [ShipKind; FLEET_SIZE] = ShipKind::ALL;

/// Total number of ship segments in one fleet.
pub const TOTAL_SHIP_CELLS: usize = 4 + 3 + 2 + 1;

/// Attempts the auto-placer makes per ship before giving up.
pub const PLACEMENT_ATTEMPTS: usize = 500;
/// Samples the opponent draws looking for a cell it has not fired at.
pub const TARGETING_ATTEMPTS: usize = 300;
/// Pause before the opponent's shot resolves.
pub const OPPONENT_DELAY_MS: u64 = 400;

#[cfg(feature = "std")]
pub use settings::Settings;

#[cfg(feature = "std")]
mod settings {
    use std::path::PathBuf;
    use std::time::Duration;

    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::OPPONENT_DELAY_MS;

    /// Default location of the save file, relative to the working directory.
    pub const DEFAULT_SAVE_PATH: &str = "battleship-save.json";

    /// Runtime knobs supplied by the command line.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Settings {
        pub save_path: PathBuf,
        pub opponent_delay: Duration,
        /// Fixed RNG seed for reproducible games.
        pub seed: Option<u64>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                save_path: PathBuf::from(DEFAULT_SAVE_PATH),
                opponent_delay: Duration::from_millis(OPPONENT_DELAY_MS),
                seed: None,
            }
        }
    }

    impl Settings {
        /// Random source for this run: seeded when a seed is configured.
        pub fn rng(&self) -> SmallRng {
            match self.seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => {
                    let mut seed_rng = rand::rng();
                    SmallRng::from_rng(&mut seed_rng)
                }
            }
        }
    }
}
