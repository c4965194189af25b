/// The last `max` rest times paired with their 1-based set numbers
pub fn recent_rests(set_times: &[u32], max: usize) -> Vec<(usize, u32)> {
    let skip = set_times.len().saturating_sub(max);
    set_times
        .iter()
        .copied()
        .enumerate()
        .skip(skip)
        .map(|(idx, rest)| (idx + 1, rest))
        .collect()
}
