use rust_decimal::Decimal;

use crate::models::SessionType;

const RACE_POINTS: [i64; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];
const SPRINT_POINTS: [i64; 8] = [8, 7, 6, 5, 4, 3, 2, 1];

/// Championship points for a finishing position.
///
/// Qualifying has no points table (it is scored with flat bonuses), so it
/// always yields zero here, as does any position off the end of a table.
pub fn base_points(position: i32, session: SessionType) -> Decimal {
    let table: &[i64] = match session {
        SessionType::Race => &RACE_POINTS,
        SessionType::Sprint => &SPRINT_POINTS,
        SessionType::Qualifying => return Decimal::ZERO,
    };

    usize::try_from(position)
        .ok()
        .and_then(|p| p.checked_sub(1))
        .and_then(|idx| table.get(idx))
        .map(|&points| Decimal::from(points))
        .unwrap_or(Decimal::ZERO)
}
