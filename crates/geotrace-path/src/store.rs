use geotrace_geo::LatLng;

use crate::PathError;

/// Ordered sequence of clicked coordinates, the single source of truth for the path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointStore {
    points: Vec<LatLng>,
}

impl PointStore {
    /// Append a point at the end of the path and return its index
    pub fn append(&mut self, point: LatLng) -> usize {
        self.points.push(point);
        self.points.len() - 1
    }

    /// Replace the point at `index`, keeping its position in the path
    pub fn replace(&mut self, index: usize, point: LatLng) -> Result<(), PathError> {
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or(PathError::OutOfRange { index, len })?;
        *slot = point;
        Ok(())
    }

    /// Remove the last point, `None` if the store is empty
    pub fn remove_last(&mut self) -> Option<LatLng> {
        self.points.pop()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&LatLng> {
        self.points.get(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotrace_test_util::phitsanulok_walk;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    #[test]
    fn test_append_returns_index() {
        let mut store = PointStore::default();
        for (i, p) in phitsanulok_walk().into_iter().enumerate() {
            assert_eq!(store.append(p), i);
        }
        assert_eq!(store.points(), phitsanulok_walk().as_slice());
    }

    #[test]
    fn test_replace_in_place() -> TestResult {
        let mut store = PointStore::default();
        for p in phitsanulok_walk() {
            store.append(p);
        }
        let moved = LatLng::new(1.0, 2.0);
        store.replace(2, moved)?;

        let mut expected = phitsanulok_walk();
        expected[2] = moved;
        assert_eq!(store.points(), expected.as_slice());
        Ok(())
    }

    #[test]
    fn test_replace_out_of_range() {
        let mut store = PointStore::default();
        store.append(LatLng::new(0.0, 0.0));
        let err = store.replace(1, LatLng::new(1.0, 1.0)).unwrap_err();
        assert_eq!(err, PathError::OutOfRange { index: 1, len: 1 });
        assert_eq!(store.points(), &[LatLng::new(0.0, 0.0)]);
    }

    #[test]
    fn test_remove_last_on_empty_is_noop() {
        let mut store = PointStore::default();
        assert_eq!(store.remove_last(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_last_preserves_order() {
        let mut store = PointStore::default();
        let walk = phitsanulok_walk();
        for p in &walk {
            store.append(*p);
        }
        assert_eq!(store.remove_last(), walk.last().copied());
        assert_eq!(store.points(), &walk[..walk.len() - 1]);
    }

    #[test]
    fn test_clear() {
        let mut store = PointStore::default();
        store.append(LatLng::new(0.0, 0.0));
        store.clear();
        assert_eq!(store.len(), 0);
    }
}
