use geom::Pt2D;

use crate::RestrictionType;

/// Guesses the kind of restriction a turn needs from the angle between the two roads, as drawn
/// on screen.
pub fn infer_restriction(
    from: Pt2D,
    via: Pt2D,
    to: Pt2D,
    same_way: bool,
    u: bool,
) -> RestrictionType {
    if u {
        return RestrictionType::NoUTurn;
    }
    // How far to rotate clockwise on screen from the destination road to reach the source road.
    // Right turns are small, left turns are large.
    let angle = via
        .angle_to(to)
        .clockwise_degrees_to(via.angle_to(from));

    if (angle < 23.0 || angle > 336.0) && same_way {
        RestrictionType::NoUTurn
    } else if angle < 158.0 {
        RestrictionType::NoRightTurn
    } else if angle > 202.0 {
        RestrictionType::NoLeftTurn
    } else {
        RestrictionType::NoStraightOn
    }
}

#[cfg(test)]
mod tests {
    use super::infer_restriction;
    use crate::RestrictionType;
    use geom::Pt2D;

    #[test]
    fn test_infer() {
        // Screen coordinates, so y points down. Coming up from the south...
        let via = Pt2D::new(200.0, 150.0);
        let south = Pt2D::new(200.0, 180.0);
        let west = Pt2D::new(140.0, 150.0);
        let east = Pt2D::new(260.0, 150.0);
        let north = Pt2D::new(200.0, 90.0);

        assert_eq!(
            RestrictionType::NoLeftTurn,
            infer_restriction(south, via, west, false, false)
        );
        assert_eq!(
            RestrictionType::NoRightTurn,
            infer_restriction(south, via, east, false, false)
        );
        assert_eq!(
            RestrictionType::NoStraightOn,
            infer_restriction(south, via, north, false, false)
        );
        assert_eq!(
            RestrictionType::NoUTurn,
            infer_restriction(south, via, south, false, true)
        );
        // A sharp turn back onto another part of the same way
        let almost_south = Pt2D::new(205.0, 180.0);
        assert_eq!(
            RestrictionType::NoUTurn,
            infer_restriction(south, via, almost_south, true, false)
        );
        assert_eq!(
            RestrictionType::NoRightTurn,
            infer_restriction(south, via, almost_south, false, false)
        );
    }
}
