//! Static type chart.

/// Every type tag a record can carry, in the order the filter cycles through.
pub const TYPE_NAMES: [&str; 18] = [
    "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

/// Attacking types that deal double damage to `type_name`.
pub fn weaknesses_of(type_name: &str) -> &'static [&'static str] {
    match type_name {
        "normal" => &["fighting"],
        "fire" => &["water", "ground", "rock"],
        "water" => &["electric", "grass"],
        "electric" => &["ground"],
        "grass" => &["fire", "ice", "poison", "flying", "bug"],
        "ice" => &["fire", "fighting", "rock", "steel"],
        "fighting" => &["flying", "psychic", "fairy"],
        "poison" => &["ground", "psychic"],
        "ground" => &["water", "grass", "ice"],
        "flying" => &["electric", "ice", "rock"],
        "psychic" => &["bug", "ghost", "dark"],
        "bug" => &["fire", "flying", "rock"],
        "rock" => &["water", "grass", "fighting", "ground", "steel"],
        "ghost" => &["ghost", "dark"],
        "dragon" => &["ice", "dragon", "fairy"],
        "dark" => &["fighting", "bug", "fairy"],
        "steel" => &["fire", "fighting", "ground"],
        "fairy" => &["poison", "steel"],
        _ => &[],
    }
}
