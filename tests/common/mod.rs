use approx::assert_abs_diff_eq;
use orbphase::cycles::CycleInterval;

/// Assert that the intervals, taken in order, tile `[0, window_length]` without gaps.
pub fn assert_window_covered(intervals: &[CycleInterval], window_length: f64, epsilon: f64) {
    assert!(!intervals.is_empty(), "no interval placed");

    let first = &intervals[0];
    let last = &intervals[intervals.len() - 1];
    assert!(
        first.start_offset <= epsilon,
        "leading gap: first interval starts at {}",
        first.start_offset
    );
    assert!(
        last.end_offset() >= window_length - epsilon,
        "trailing gap: last interval ends at {}",
        last.end_offset()
    );

    for pair in intervals.windows(2) {
        assert_abs_diff_eq!(pair[0].end_offset(), pair[1].start_offset, epsilon = epsilon);
    }
}
