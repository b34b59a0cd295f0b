use approx::assert_relative_eq;
use cardmat_layout::{plan, Corner, LayoutError, LayoutSpec, MatPlan, Rect};

fn card_scenario() -> LayoutSpec {
    LayoutSpec {
        card_width_mm: 63.5,
        card_height_mm: 88.9,
        marker_size_mm: 20.0,
        gap_mm: 10.0,
    }
}

#[test]
fn standard_card_offsets() {
    let p = plan(&card_scenario()).expect("plan");
    let tl = p.marker(0).expect("id 0");
    assert_eq!(tl.corner, Corner::TopLeft);
    assert_relative_eq!(tl.center.x, -51.75, epsilon = 1e-12);
    assert_relative_eq!(tl.center.y, 64.45, epsilon = 1e-12);

    let br = p.marker(2).expect("id 2");
    assert_relative_eq!(br.center.x, 51.75, epsilon = 1e-12);
    assert_relative_eq!(br.center.y, -64.45, epsilon = 1e-12);
}

#[test]
fn corner_signs_are_fixed() {
    let p = plan(&card_scenario()).expect("plan");
    let signs: Vec<(u32, f64, f64)> = p
        .markers
        .iter()
        .map(|m| (m.id, m.center.x.signum(), m.center.y.signum()))
        .collect();
    assert_eq!(
        signs,
        vec![(0, -1.0, 1.0), (1, 1.0, 1.0), (2, 1.0, -1.0), (3, -1.0, -1.0)]
    );
}

fn specs() -> impl Iterator<Item = LayoutSpec> {
    let cards = [(63.5, 88.9), (59.0, 86.0), (10.0, 200.0), (0.5, 0.5)];
    let markers = [0.1, 5.0, 20.0, 150.0];
    let gaps = [1e-6, 0.01, 10.0, 80.0];
    cards.into_iter().flat_map(move |(w, h)| {
        markers.into_iter().flat_map(move |m| {
            gaps.into_iter().map(move |g| LayoutSpec {
                card_width_mm: w,
                card_height_mm: h,
                marker_size_mm: m,
                gap_mm: g,
            })
        })
    })
}

fn assert_disjoint(p: &MatPlan) {
    let mut boxes: Vec<Rect> = vec![p.outline.bounds()];
    boxes.extend(p.marker_bounds());
    for i in 0..boxes.len() {
        for j in (i + 1)..boxes.len() {
            assert!(
                !boxes[i].overlaps(&boxes[j]),
                "boxes {i} and {j} overlap for {:?}",
                p.spec
            );
        }
    }
}

#[test]
fn outline_and_markers_are_pairwise_disjoint() {
    for spec in specs() {
        assert_disjoint(&plan(&spec).expect("plan"));
    }
}

/// Gaps near the float step of `card / 2` are either rejected or still
/// leave every box disjoint; a plan that overlaps is never returned.
#[test]
fn sub_ulp_gaps_never_overlap() {
    let cards = [(0.5, 0.5), (63.5, 88.9), (166.8848353769301, 49.27354265920207)];
    let markers = [0.1, 20.0, 90.18286659504037];
    let gaps = [1e-16, 1e-15, 3.492811024694186e-15, 1e-14, 1e-13];
    let mut rejected = 0;
    for (w, h) in cards {
        for m in markers {
            for g in gaps {
                let spec = LayoutSpec {
                    card_width_mm: w,
                    card_height_mm: h,
                    marker_size_mm: m,
                    gap_mm: g,
                };
                match plan(&spec) {
                    Ok(p) => assert_disjoint(&p),
                    Err(LayoutError::InvalidLayoutSpec { field, .. }) => {
                        assert_eq!(field, "gap_mm", "{spec:?}");
                        rejected += 1;
                    }
                }
            }
        }
    }
    assert!(rejected > 0);

    let lost = LayoutSpec {
        card_width_mm: 166.8848353769301,
        card_height_mm: 49.27354265920207,
        marker_size_mm: 90.18286659504037,
        gap_mm: 3.492811024694186e-15,
    };
    assert!(plan(&lost).is_err());
}

#[test]
fn markers_clear_outline_by_gap() {
    for spec in specs() {
        let p = plan(&spec).expect("plan");
        let card = p.outline.bounds();
        let tolerance = 1e-9 * (1.0 + spec.card_width_mm + spec.card_height_mm);
        for (m, r) in p.markers.iter().zip(p.marker_bounds()) {
            let clear_x = match m.corner {
                Corner::TopLeft | Corner::BottomLeft => card.min.x - r.max.x,
                Corner::TopRight | Corner::BottomRight => r.min.x - card.max.x,
            };
            let clear_y = match m.corner {
                Corner::TopLeft | Corner::TopRight => r.min.y - card.max.y,
                Corner::BottomLeft | Corner::BottomRight => card.min.y - r.max.y,
            };
            assert_relative_eq!(clear_x, spec.gap_mm, epsilon = tolerance);
            assert_relative_eq!(clear_y, spec.gap_mm, epsilon = tolerance);
        }
    }
}

#[test]
fn plan_is_deterministic() {
    let spec = card_scenario();
    assert_eq!(plan(&spec), plan(&spec));
}

#[test]
fn non_positive_fields_are_rejected() {
    let base = card_scenario();
    let bad = [
        LayoutSpec {
            card_width_mm: 0.0,
            ..base
        },
        LayoutSpec {
            card_height_mm: -88.9,
            ..base
        },
        LayoutSpec {
            marker_size_mm: -1.0,
            ..base
        },
        LayoutSpec {
            gap_mm: 0.0,
            ..base
        },
    ];
    for spec in bad {
        assert!(plan(&spec).is_err(), "{spec:?}");
    }
}
