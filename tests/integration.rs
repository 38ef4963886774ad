use graph3d_engine::{
    Bounds, CoordinateSystem, Equation, EquationError, FunctionLibrary, SampleConfig,
    VariablesUsed,
};

fn config(points: u32, curves: u32) -> SampleConfig {
    SampleConfig {
        points_per_curve: points,
        curves_per_surface: curves,
        ..SampleConfig::default()
    }
}

#[test]
fn sine_curve_end_to_end() {
    let eq = Equation::new(
        "y=sin(x)",
        2,
        vec![Bounds::new(-10.0, 10.0)],
        config(20, 50),
        FunctionLibrary::with_seed(1),
    );
    assert!(eq.is_successful());

    let classification = eq.classification().expect("classified");
    assert_eq!(classification.system, CoordinateSystem::Cartesian);
    assert_eq!(classification.role, VariablesUsed::One);
    assert_eq!(classification.independent, vec!["x"]);

    let generated = eq.generate().expect("generates");
    assert_eq!(generated.wireframe.u_curves.len(), 1);
    assert_eq!(generated.wireframe.u_curves[0].len(), 21);
    assert!(generated.quads.is_none());

    for vertex in &generated.wireframe.u_curves[0].vertices {
        let point = vertex.as_point().expect("sine is finite everywhere");
        assert!((point.y - point.x.sin()).abs() < 1e-9);
        assert_eq!(point.z, 0.0);
    }
}

#[test]
fn saddle_surface_end_to_end() {
    let eq = Equation::new(
        "z=x*y",
        3,
        vec![Bounds::new(-5.0, 5.0), Bounds::new(-5.0, 5.0)],
        config(50, 50),
        FunctionLibrary::with_seed(1),
    );
    let generated = eq.generate().expect("generates");
    let wf = &generated.wireframe;

    assert_eq!(wf.u_curves.len(), 51);
    assert_eq!(wf.v_curves.len(), 51);
    for curve in &wf.u_curves {
        assert_eq!(curve.len(), 51);
    }

    assert_eq!(generated.quads.expect("quads").len(), 2500);
    assert_eq!(generated.triangles.expect("triangles").len(), 5000);

    // z = x*y at every grid point
    for curve in &wf.u_curves {
        for vertex in &curve.vertices {
            let p = vertex.as_point().expect("surface samples are points");
            assert!((p.z - p.x * p.y).abs() < 1e-9, "off-surface point {p:?}");
        }
    }
}

#[test]
fn wireframe_transposition_is_involutive() {
    let eq = Equation::new(
        "z=x*y",
        3,
        vec![Bounds::new(0.0, 2.0), Bounds::new(0.0, 2.0)],
        config(4, 4),
        FunctionLibrary::with_seed(1),
    );
    let wf = eq.generate().expect("generates").wireframe;

    for (i, u) in wf.u_curves.iter().enumerate() {
        for (j, vertex) in u.vertices.iter().enumerate() {
            assert_eq!(wf.v_curves[j].vertices[i], *vertex);
        }
    }
}

#[test]
fn spherical_polar_curve() {
    let eq = Equation::new(
        "r=theta",
        2,
        vec![Bounds::new(0.0, 6.0)],
        config(12, 50),
        FunctionLibrary::with_seed(1),
    );
    assert!(eq.is_successful());
    let classification = eq.classification().expect("classified");
    assert_eq!(classification.system, CoordinateSystem::Spherical);
    assert_eq!(classification.role, VariablesUsed::One);
    assert_eq!(classification.independent, vec!["theta"]);

    let generated = eq.generate().expect("generates");
    for vertex in &generated.wireframe.u_curves[0].vertices {
        let p = vertex.as_point().expect("finite");
        // radius in the XY plane equals theta
        let radius = (p.x * p.x + p.y * p.y).sqrt();
        assert!(p.z.abs() < 1e-12);
        assert!(radius <= 6.0 + 1e-9);
    }
}

#[test]
fn empty_expression_is_unusable() {
    let eq = Equation::new(
        "",
        2,
        vec![Bounds::new(0.0, 1.0)],
        SampleConfig::default(),
        FunctionLibrary::new(),
    );
    assert!(!eq.is_successful());
    assert_eq!(eq.error(), Some(&EquationError::EmptyExpression));
    assert_eq!(eq.generate(), Err(EquationError::NotGenerated));
}

#[test]
fn generation_is_idempotent() {
    let eq = Equation::new(
        "z=sin(x)+sin(y)",
        3,
        vec![Bounds::new(-6.0, 6.0), Bounds::new(-6.0, 6.0)],
        config(24, 24),
        FunctionLibrary::with_seed(7),
    );
    let first = eq.generate().expect("generates");
    let second = eq.generate().expect("generates");
    assert_eq!(first, second);
}

#[test]
fn wrapped_surface_closes_both_directions() {
    let cfg = SampleConfig {
        points_per_curve: 8,
        curves_per_surface: 8,
        point_wrap: true,
        curve_wrap: true,
        ..SampleConfig::default()
    };
    let eq = Equation::new(
        "z=x*y",
        3,
        vec![Bounds::new(0.0, 1.0), Bounds::new(0.0, 1.0)],
        cfg,
        FunctionLibrary::with_seed(1),
    );
    let wf = eq.generate().expect("generates").wireframe;

    // 9 sampled rows + wrapped first row; 9 samples + wrapped first point
    assert_eq!(wf.u_curves.len(), 10);
    for curve in &wf.u_curves {
        assert_eq!(curve.len(), 10);
        assert_eq!(curve.vertices[9], curve.vertices[0]);
    }
    assert_eq!(wf.u_curves[9], wf.u_curves[0]);
}

#[test]
fn rejected_resolution_is_a_configuration_error() {
    let eq = Equation::new(
        "y=x",
        2,
        vec![Bounds::new(0.0, 1.0)],
        config(999, 50),
        FunctionLibrary::new(),
    );
    assert!(matches!(eq.error(), Some(EquationError::Configuration(_))));
}
