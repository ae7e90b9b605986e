//! End-to-end flow: login, upload, render, export round-trip, logout.

use coinscope::{
    AuthError, ChartParameters, ChartSpec, ChartSpecBuilder, CredentialStore, Dashboard,
    DashboardError, DatasetLoader, ExportBuilder, MetricDeriver,
};

const UPLOAD: &str = "\
name,24h_volume_usd,market_cap_usd,price_usd\n\
bitcoin,20000000.0,600000000.0,30000.0\n\
ethereum,9000000.0,250000000.0,2000.0\n\
tether,50000000.0,0.0,1.0\n\
ripple,800000.0,20000000.0,0.5\n\
cardano,400000.0,10000000.0,0.3\n\
solana,700000.0,15000000.0,20.0\n\
dogecoin,300000.0,9000000.0,0.07\n";

fn authenticated_dashboard() -> Dashboard {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut dash = Dashboard::new(CredentialStore::demo());
    dash.login("admin", "admin").unwrap();
    dash.load_upload(UPLOAD.as_bytes()).unwrap();
    dash
}

#[test]
fn full_flow_produces_all_views() {
    let dash = authenticated_dashboard();
    let params = ChartParameters {
        x_axis: "24h_volume_usd".to_string(),
        y_axis: "market_cap_usd".to_string(),
        box_column: "price_usd".to_string(),
        top_n: 5,
        show_correlation: true,
    };
    let view = dash.render(&params).unwrap();

    let ChartSpec::Scatter(scatter) = &view.scatter else {
        panic!("expected scatter spec");
    };
    // Tether's zero market cap is excluded from the log axes
    assert_eq!(scatter.points.len(), 4);
    assert!(scatter.points.iter().all(|p| p.label != "tether"));

    let ChartSpec::Box(bx) = &view.box_plot else {
        panic!("expected box spec");
    };
    let total: usize = bx.traces.iter().map(|t| t.values.len()).sum();
    assert_eq!(total, 7);

    let ChartSpec::Heatmap(hm) = view.heatmap.as_ref().unwrap() else {
        panic!("expected heatmap spec");
    };
    // volume, market cap, price, derived ratio
    assert_eq!(hm.columns.len(), 4);
    for i in 0..hm.columns.len() {
        assert_eq!(hm.matrix[i][i], 1.0);
    }

    assert_eq!(view.table.rows.len(), 5);
    assert_eq!(view.table.columns.len(), 5);
}

#[test]
fn login_failures_are_classified_and_gate_the_pipeline() {
    let mut dash = Dashboard::new(CredentialStore::demo());
    assert_eq!(
        dash.login("admin", "password"),
        Err(AuthError::WrongPassword)
    );
    assert_eq!(dash.login("ghost", "password"), Err(AuthError::UnknownUser));
    assert!(matches!(
        dash.load_upload(UPLOAD.as_bytes()),
        Err(DashboardError::Auth(AuthError::NotAuthenticated))
    ));
}

#[test]
fn logout_requires_fresh_login_before_rendering() {
    let mut dash = authenticated_dashboard();
    let params = dash.default_parameters().unwrap();
    assert!(dash.render(&params).is_ok());

    dash.logout();
    assert!(matches!(
        dash.render(&params),
        Err(DashboardError::Auth(AuthError::NotAuthenticated))
    ));

    dash.login("user", "user").unwrap();
    dash.load_upload(UPLOAD.as_bytes()).unwrap();
    assert!(dash.render(&params).is_ok());
}

#[test]
fn export_of_augmented_frame_round_trips_through_the_loader() {
    let mut loader = DatasetLoader::new();
    let df = loader.load_bytes(UPLOAD.as_bytes()).unwrap().clone();
    let augmented = MetricDeriver::augment(&df).unwrap();

    let bytes = ExportBuilder::serialize(&augmented).unwrap();
    let reloaded = loader.load_bytes(&bytes).unwrap();

    assert_eq!(reloaded.height(), 7);
    assert_eq!(reloaded.width(), 5);
    let names: Vec<String> = reloaded
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert!(names.contains(&"volume_to_market_cap".to_string()));

    // Downstream builders accept the reloaded frame unchanged
    let spec = ChartSpecBuilder::heatmap(reloaded).unwrap();
    assert!(!spec.is_empty());
}
