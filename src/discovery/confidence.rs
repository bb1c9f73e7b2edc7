use crate::discovery::Candidate;

const STRONG_SCORE: u32 = 80;

/// Aggregate 0..=100 signal for how trustworthy a discovery result is.
pub fn confidence(server: &[Candidate], client: &[Candidate]) -> u8 {
    let mut total: u32 = 0;
    if !server.is_empty() {
        total += 30;
    }
    if !client.is_empty() {
        total += 30;
    }
    if server.first().is_some_and(|c| c.score > STRONG_SCORE) {
        total += 20;
    }
    if client.first().is_some_and(|c| c.score > STRONG_SCORE) {
        total += 20;
    }
    if !server.is_empty() && !client.is_empty() {
        total += 10;
    }
    if server.len() > 1 {
        total += 5;
    }
    if client.len() > 1 {
        total += 5;
    }
    u8::try_from(total.min(100)).unwrap_or(100)
}
