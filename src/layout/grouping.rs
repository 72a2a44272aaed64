//! # Section Grouping
//!
//! Packs sections side by side into horizontal bands when they report a
//! minimum width. Sections are taken in order; a band closes as soon as the
//! next section would overflow the viewport.

use crate::geometry::floored_to_scale;

/// A section's horizontal slot within its group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSlot {
    pub section: usize,
    pub x: f64,
    pub width: f64,
}

/// Group sections by their minimum widths.
///
/// `None` asks for the full viewport. Each group's leftover width is spread
/// evenly over its members; the last member absorbs the pixel rounding so
/// the group spans exactly `viewport_width`.
pub fn group_sections(
    minimum_widths: &[Option<f64>],
    viewport_width: f64,
    scale: f64,
) -> Vec<Vec<SectionSlot>> {
    let viewport_width = viewport_width.max(0.0);
    let widths: Vec<f64> = minimum_widths
        .iter()
        .map(|w| match w {
            Some(w) if w.is_finite() => w.floor().clamp(0.0, viewport_width),
            _ => viewport_width,
        })
        .collect();

    let mut groups = Vec::new();
    let mut next = 0;

    while next < widths.len() {
        let start = next;
        let mut used = 0.0;
        while next < widths.len() {
            let proposed = used + widths[next];
            // A full band takes no more members, even zero-width ones.
            if next > start && (used >= viewport_width || proposed > viewport_width) {
                break;
            }
            used = proposed;
            next += 1;
        }

        let members = &widths[start..next];
        let leftover_per_section = (viewport_width - used).max(0.0) / members.len() as f64;

        let mut x = 0.0;
        let mut group = Vec::with_capacity(members.len());
        for (offset, min_width) in members.iter().enumerate() {
            let width = if offset == members.len() - 1 {
                (viewport_width - x).max(0.0)
            } else {
                floored_to_scale(min_width + leftover_per_section, scale)
            };
            group.push(SectionSlot {
                section: start + offset,
                x,
                width,
            });
            x += width;
        }
        log::trace!(
            "section group {}..{}: minimum {} of {}",
            start,
            next,
            used,
            viewport_width
        );
        groups.push(group);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_width_sections_group_alone() {
        let groups = group_sections(&[None, None, None], 320.0, 2.0);
        assert_eq!(groups.len(), 3);
        for (i, group) in groups.iter().enumerate() {
            assert_eq!(
                group,
                &vec![SectionSlot {
                    section: i,
                    x: 0.0,
                    width: 320.0
                }]
            );
        }
    }

    #[test]
    fn test_side_by_side_leftover_split_evenly() {
        // 300 + 300 fits in 700; 100 leftover gives each section 50 more.
        let groups = group_sections(&[Some(300.0), Some(300.0), Some(300.0)], 700.0, 2.0);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0][0].width, 350.0);
        assert_eq!(groups[0][1].x, 350.0);
        assert_eq!(groups[0][1].width, 350.0);
        assert_eq!(groups[1], vec![SectionSlot { section: 2, x: 0.0, width: 700.0 }]);
    }

    #[test]
    fn test_group_never_exceeds_viewport() {
        let groups = group_sections(&[Some(100.3), Some(100.3), Some(100.3)], 320.5, 3.0);
        assert_eq!(groups.len(), 1);
        let total: f64 = groups[0].iter().map(|s| s.width).sum();
        assert!((total - 320.5).abs() < 1e-9);
        let last = groups[0][2];
        assert!((last.x + last.width - 320.5).abs() < 1e-9);
    }

    #[test]
    fn test_oversized_minimum_clamped_to_viewport() {
        let groups = group_sections(&[Some(2000.0), Some(-5.0)], 400.0, 2.0);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0][0].width, 400.0);
        // A negative minimum is treated as zero and then takes the whole band.
        assert_eq!(groups[1][0].width, 400.0);
    }

    #[test]
    fn test_zero_minimum_starts_new_group_after_full_band() {
        let groups = group_sections(&[Some(400.0), Some(0.0)], 400.0, 2.0);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1], vec![SectionSlot { section: 1, x: 0.0, width: 400.0 }]);

        let groups = group_sections(&[None, Some(0.0)], 320.0, 2.0);
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().flatten().all(|slot| slot.width > 0.0));
    }

    #[test]
    fn test_zero_minimum_shares_leftover_in_open_band() {
        let groups = group_sections(&[Some(200.0), Some(0.0)], 400.0, 2.0);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0][0].width, 300.0);
        assert_eq!(groups[0][1], SectionSlot { section: 1, x: 300.0, width: 100.0 });
    }

    #[test]
    fn test_empty_input() {
        assert!(group_sections(&[], 400.0, 2.0).is_empty());
    }
}
