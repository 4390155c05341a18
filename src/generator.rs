//! Board generation and icon reshuffling.
//!
//! A board is dealt from a multiset holding every icon type the same, even
//! number of times, so a fully cleared board is always reachable in terms of
//! counts. After dealing, a few disruption passes rerandomize which icon sits
//! on which occupied cell without moving any cell.
//!
//! Generation does not check that a legal pair exists. Callers use
//! `scanner::has_available_match` afterwards and reshuffle when needed.
use crate::config::{DifficultyConfig, GeneratorSettings};
use crate::engine::{Board, IconType, MAX_ICON_TYPE};
use crate::error::ConfigurationError;
use crate::shuffle::shuffle_in_place;
use crate::vlog;
use rand::Rng;

/// Generates a board for `config` with the default generator settings.
///
/// # Errors
/// Returns a `ConfigurationError` when the grid cannot be split into an even
/// number of tiles per icon type.
///
/// # Examples
/// ```
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
/// use tilelink::config::Difficulty;
/// use tilelink::generator::generate;
///
/// let mut rng = SmallRng::seed_from_u64(514514);
/// let board = generate(&Difficulty::Easy.config(), &mut rng).unwrap();
/// assert_eq!(board.tiles().len(), 48);
/// assert_eq!(board.occupied_count(), 48);
/// ```
pub fn generate(config: &DifficultyConfig, rng: &mut impl Rng) -> Result<Board, ConfigurationError> {
    generate_with_settings(config, &GeneratorSettings::default(), rng)
}

/// Generates a board for `config` using explicit generator settings.
pub fn generate_with_settings(
    config: &DifficultyConfig,
    settings: &GeneratorSettings,
    rng: &mut impl Rng,
) -> Result<Board, ConfigurationError> {
    let tiles_per_icon = validate(config, settings)?;

    let mut icons: Vec<IconType> = Vec::with_capacity(config.cell_count());
    for icon in 1..=config.icon_types as IconType {
        icons.extend(std::iter::repeat(icon).take(tiles_per_icon));
    }
    shuffle_in_place(&mut icons, rng);

    let mut board = Board::from_icons(config.rows, config.cols, icons);
    for _ in 0..settings.disrupt_times {
        disrupt_board(&mut board, rng);
    }

    vlog!(
        "generated {}x{} board: {} icon types x {} tiles, {} disruption passes",
        config.rows,
        config.cols,
        config.icon_types,
        tiles_per_icon,
        settings.disrupt_times
    );
    Ok(board)
}

/// Checks the generation preconditions and returns the tile count per icon.
fn validate(
    config: &DifficultyConfig,
    settings: &GeneratorSettings,
) -> Result<usize, ConfigurationError> {
    if config.rows == 0 || config.cols == 0 {
        return Err(ConfigurationError::EmptyBoard {
            rows: config.rows,
            cols: config.cols,
        });
    }
    let cells = config.cell_count();
    if cells % 2 != 0 {
        return Err(ConfigurationError::OddCellCount {
            rows: config.rows,
            cols: config.cols,
            cells,
        });
    }
    if config.icon_types == 0 {
        return Err(ConfigurationError::NoIconTypes);
    }
    if config.icon_types > MAX_ICON_TYPE as usize {
        return Err(ConfigurationError::TooManyIconTypes {
            icon_types: config.icon_types,
            max: MAX_ICON_TYPE as usize,
        });
    }
    if cells % config.icon_types != 0 {
        return Err(ConfigurationError::UnevenIconSplit {
            cells,
            icon_types: config.icon_types,
        });
    }

    let tiles_per_icon = cells / config.icon_types;
    let weighted = tiles_per_icon * settings.multiple;
    if weighted % 2 != 0 {
        return Err(ConfigurationError::OddIconCount { per_icon: weighted });
    }
    if tiles_per_icon % 2 != 0 {
        return Err(ConfigurationError::OddIconCount {
            per_icon: tiles_per_icon,
        });
    }
    Ok(tiles_per_icon)
}

/// Reshuffles the icons of the occupied cells in place.
///
/// The set of occupied positions, every tile's identity, and the multiset of
/// icons are preserved. Only which icon sits where changes.
pub fn disrupt_board(board: &mut Board, rng: &mut impl Rng) {
    let mut icons = board.occupied_icons();
    shuffle_in_place(&mut icons, rng);
    board.reassign_occupied_icons(&icons);
}

/// Player- or stalemate-triggered reshuffle. Same as one disruption pass.
pub fn shuffle_board(board: &mut Board, rng: &mut impl Rng) {
    disrupt_board(board, rng);
    vlog!("reshuffled {} occupied tiles", board.occupied_count());
}
