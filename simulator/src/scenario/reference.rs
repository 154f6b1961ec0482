use trackcore::map_interface::Position;

/// Seed layout for the canned demo paddock: three entities a few hundred
/// meters apart.
pub fn reference_seeds() -> Vec<Position> {
    vec![
        Position::new(16.1622, 74.8298),
        Position::new(16.1605, 74.8323),
        Position::new(16.1585, 74.8278),
    ]
}
