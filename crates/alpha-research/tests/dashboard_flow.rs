//! End-to-end search flow against a stub research service

use std::time::Duration;

use alpha_research::render::ids;
use alpha_research::{
    Dashboard, DashboardConfig, LiveMarketTable, LiveQuote, MockDataGenerator, ResearchClient,
    Tab, Ticker,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> DashboardConfig {
    DashboardConfig::builder()
        .research_endpoint(server.uri())
        .request_timeout(Duration::from_millis(200))
        .seed(11)
        .build()
        .unwrap()
}

#[tokio::test]
async fn search_uses_research_service_when_available() {
    let server = MockServer::start().await;
    let amd = Ticker::parse("AMD").unwrap();
    let mut profile = MockDataGenerator::with_seed(3).generate(&amd);
    profile.company_name = Some("Advanced Micro Devices".to_string());

    Mock::given(method("GET"))
        .and(path("/api/research/AMD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&profile))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = ResearchClient::new(&config).unwrap();
    let mut dashboard = Dashboard::new(config).unwrap();
    dashboard.bootstrap();

    assert_eq!(dashboard.search(&client, "amd").await, Some(amd.clone()));
    assert_eq!(dashboard.profile(&amd), Some(&profile));
    assert_eq!(
        dashboard.page().text(ids::COMPANY_NAME).as_deref(),
        Some("Advanced Micro Devices")
    );

    let html = dashboard.to_html(None).unwrap();
    assert!(html.contains("AMD | AlphaOne Research"));
    assert!(html.contains("Advanced Micro Devices"));
}

#[tokio::test]
async fn search_falls_back_when_service_is_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = ResearchClient::new(&config).unwrap();
    let mut dashboard = Dashboard::new(config).unwrap();
    dashboard.bootstrap();
    dashboard.switch_tab(Tab::Technicals);

    let ticker = dashboard.search(&client, "PLTR").await.unwrap();
    let profile = dashboard.profile(&ticker).unwrap();
    assert_eq!(profile.price_history.len(), 30);
    assert_eq!(dashboard.sidebar().last().unwrap().name, "PLTR Corp");
    assert_eq!(dashboard.active_tab(), Tab::Technicals);
    assert_eq!(dashboard.charts().live_instances(), 3);
}

#[tokio::test]
async fn search_falls_back_on_slow_service() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = ResearchClient::new(&config).unwrap();

    let mut live = LiveMarketTable::new();
    live.insert(
        Ticker::parse("RIVN").unwrap(),
        LiveQuote {
            price: 14.25,
            ..LiveQuote::default()
        },
    );
    let generator = MockDataGenerator::with_seed(9).with_live_data(live);
    let mut dashboard = Dashboard::with_generator(config, generator).unwrap();

    dashboard.search(&client, "rivn").await;
    assert_eq!(
        dashboard.page().text(ids::COMPANY_PRICE).as_deref(),
        Some("$14.25")
    );
}
