use crate::domain::SpectralLine;

/// Keeps the `count` lines with the largest intensity.
///
/// The survivors keep their input order, so a wavenumber-sorted list stays
/// sorted. Ties at the cut-off resolve in favour of the earlier line.
pub fn strongest_lines(lines: &[SpectralLine], count: usize) -> Vec<SpectralLine> {
    if count >= lines.len() {
        return lines.to_vec();
    }

    let mut ranked: Vec<usize> = (0..lines.len()).collect();
    ranked.sort_by(|left, right| {
        lines[*right]
            .line_intensity
            .total_cmp(&lines[*left].line_intensity)
            .then(left.cmp(right))
    });
    ranked.truncate(count);
    ranked.sort_unstable();

    ranked.into_iter().map(|index| lines[index]).collect()
}

/// Lines whose center lies in `[min_frequency, max_frequency]`.
pub fn lines_in_window(
    lines: &[SpectralLine],
    min_frequency: f64,
    max_frequency: f64,
) -> Vec<SpectralLine> {
    let (low, high) = if min_frequency <= max_frequency {
        (min_frequency, max_frequency)
    } else {
        (max_frequency, min_frequency)
    };
    lines
        .iter()
        .filter(|line| (low..=high).contains(&line.center_frequency))
        .copied()
        .collect()
}
