//! Dev domain tests.

use super::*;
use crate::collision::GameLayer;

#[test]
fn test_scatter_is_deterministic_and_in_bounds() {
    let a = scatter_ledges(42, 16);
    let b = scatter_ledges(42, 16);
    assert_eq!(a, b);
    assert_ne!(a, scatter_ledges(43, 16));

    for ledge in &a {
        assert!((-16.0..16.0).contains(&ledge.center.x));
        assert!((3.0..12.0).contains(&ledge.center.y));
        assert!(ledge.size.x >= 2.0 && ledge.size.x < 5.0);
        assert!(matches!(
            ledge.layer,
            GameLayer::Platform | GameLayer::OneWayPlatform
        ));
    }
}
