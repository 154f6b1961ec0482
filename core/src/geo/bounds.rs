use crate::map_interface::Position;

/// Axis-aligned latitude/longitude box in plain degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    /// Degenerate box containing a single position.
    pub fn of(origin: Position) -> Self {
        Self {
            min_lat: origin.lat,
            max_lat: origin.lat,
            min_lng: origin.lng,
            max_lng: origin.lng,
        }
    }

    /// Grows the box to include `position`.
    pub fn extend(&mut self, position: Position) {
        self.min_lat = self.min_lat.min(position.lat);
        self.max_lat = self.max_lat.max(position.lat);
        self.min_lng = self.min_lng.min(position.lng);
        self.max_lng = self.max_lng.max(position.lng);
    }

    /// Smallest box containing every yielded position, or `None` when the
    /// iterator is empty.
    pub fn enclosing<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let mut iter = positions.into_iter();
        let mut bounds = Self::of(iter.next()?);
        for position in iter {
            bounds.extend(position);
        }
        Some(bounds)
    }

    /// Center of the box along both axes.
    pub fn midpoint(&self) -> Position {
        Position::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enclosing_of_no_positions_is_none() {
        assert!(GeoBounds::enclosing(std::iter::empty()).is_none());
    }

    #[test]
    fn enclosing_tracks_min_and_max_per_axis() {
        let bounds = GeoBounds::enclosing(vec![
            Position::new(16.1622, 74.8298),
            Position::new(16.1605, 74.8323),
            Position::new(16.1585, 74.8278),
        ])
        .unwrap();

        assert_eq!(bounds.min_lat, 16.1585);
        assert_eq!(bounds.max_lat, 16.1622);
        assert_eq!(bounds.min_lng, 74.8278);
        assert_eq!(bounds.max_lng, 74.8323);
    }

    #[test]
    fn midpoint_is_the_box_center() {
        let bounds = GeoBounds::enclosing(vec![
            Position::new(0.0, 0.0),
            Position::new(0.0005, 0.0005),
        ])
        .unwrap();
        let mid = bounds.midpoint();
        assert!((mid.lat - 0.00025).abs() < 1e-12);
        assert!((mid.lng - 0.00025).abs() < 1e-12);
    }

    #[test]
    fn single_position_box_has_zero_span() {
        let bounds = GeoBounds::of(Position::new(1.5, -2.5));
        assert_eq!(bounds.lat_span(), 0.0);
        assert_eq!(bounds.lng_span(), 0.0);
        assert_eq!(bounds.midpoint(), Position::new(1.5, -2.5));
    }
}
