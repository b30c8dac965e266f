use parallel_viewers::{
    mandelbrot::{FractalRequest, IterationBudget},
    screen::Size,
    view_state::{Drag, FractalViewState, OrbitViewState, ORBIT_RADIANS_PER_PIXEL},
    viewport::FractalView,
};

#[test]
fn drag_pans_from_the_anchor_not_cumulatively() {
    let mut state = FractalViewState::new(FractalView::new(0.0, 0.0, 1.0));
    assert_eq!(state.drag(), Drag::Idle);

    state.begin_drag((100.0, 100.0));
    assert!(state.drag().is_dragging());

    assert!(state.drag_to((420.0, 100.0)));
    assert!((state.view().center_re - -1.0).abs() < 1e-12);

    // Moving again is measured from the press position, not the last move.
    assert!(state.drag_to((420.0, 100.0)));
    assert!((state.view().center_re - -1.0).abs() < 1e-12);

    // Dragging down moves the view up the imaginary axis.
    assert!(state.drag_to((100.0, 420.0)));
    assert!(state.view().center_re.abs() < 1e-12);
    assert!((state.view().center_im - 1.0).abs() < 1e-12);

    state.end_drag();
    assert_eq!(state.drag(), Drag::Idle);
    assert!(!state.drag_to((0.0, 0.0)));
    assert!((state.view().center_im - 1.0).abs() < 1e-12);
}

#[test]
fn pan_distance_shrinks_with_zoom() {
    let mut state = FractalViewState::new(FractalView::new(0.0, 0.0, 4.0));
    state.apply_pan((320.0, 0.0));
    assert!((state.view().center_re - -0.25).abs() < 1e-12);
}

#[test]
fn wheel_zooms_by_fixed_factor() {
    let mut state = FractalViewState::new(FractalView::new(0.0, 0.0, 1.0));
    state.wheel(1);
    assert!((state.view().scale - 1.2).abs() < 1e-12);
    state.wheel(-2);
    assert!((state.view().scale - 1.0 / 1.2).abs() < 1e-12);
}

#[test]
fn zooming_in_raises_the_iteration_budget() {
    let mut state = FractalViewState::default();
    let budget = IterationBudget::default();
    let size = Size::new(320, 200);

    let shallow = FractalRequest::from_view(size, &state.view(), &budget);
    for _ in 0..20 {
        state.wheel(1);
    }
    let deep = FractalRequest::from_view(size, &state.view(), &budget);

    assert!(deep.max_iterations > shallow.max_iterations);
    assert!(deep.bounds.width() < shallow.bounds.width());
}

#[test]
fn orbit_drag_rotates_the_camera() {
    let mut state = OrbitViewState::default();
    let before = state.camera();

    state.begin_drag((0.0, 0.0));
    state.drag_to((-50.0, 0.0));
    state.end_drag();

    assert!((state.orbit().azimuth - 50.0 * ORBIT_RADIANS_PER_PIXEL).abs() < 1e-12);
    let after = state.camera();
    assert!(after.eye[0] > before.eye[0]);
    assert!(after.is_valid());
    // Distance to the target is preserved.
    let target = state.orbit().target;
    let distance = (0..3)
        .map(|i| (after.eye[i] - target[i]).powi(2))
        .sum::<f64>()
        .sqrt();
    assert!((distance - 20.0).abs() < 1e-9);
}
