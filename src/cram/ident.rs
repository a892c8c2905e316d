use chrono::Utc;
use uuid::Uuid;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Returns a fresh record id: creation time in milliseconds, base36, followed
/// by 128 random bits, base36. The random half carries the collision
/// resistance; the time prefix keeps ids roughly ordered by creation and
/// matches the shape of ids produced by earlier versions of the app.
pub fn next_id() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u128;
    let mut id = base36(millis);
    id.push_str(&base36(Uuid::new_v4().as_u128()));
    id
}

fn base36(mut n: u128) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(DIGITS[(n % 36) as usize] as char);
        n /= 36;
    }
    digits.iter().rev().collect()
}
