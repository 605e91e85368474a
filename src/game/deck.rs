use rand::seq::SliceRandom;

use super::config::ConfigError;

pub const SYMBOLS: [&str; 18] = [
    "🌲", "🌳", "🌴", "🎄", "🍁", "🍂", "🌱", "🍃", "🌿", "🌵", "🍀", "🍄", "🪴", "🌾", "🌺",
    "🌸", "🌼", "🍇",
];

pub fn deal(rows: u32, cols: u32) -> Result<Vec<String>, ConfigError> {
    let cell_count = rows * cols;
    if cell_count % 2 != 0 {
        return Err(ConfigError::OddCellCount(cell_count));
    }
    let pair_count = (cell_count / 2) as usize;
    if pair_count > SYMBOLS.len() {
        return Err(ConfigError::NotEnoughSymbols {
            requested: pair_count as u32,
            available: SYMBOLS.len() as u32,
        });
    }

    let mut rng = rand::rng();
    let mut pool = SYMBOLS.to_vec();
    pool.shuffle(&mut rng);

    let mut values = Vec::with_capacity(cell_count as usize);
    for symbol in pool.into_iter().take(pair_count) {
        values.push(symbol.to_string());
        values.push(symbol.to_string());
    }
    values.shuffle(&mut rng);
    Ok(values)
}
