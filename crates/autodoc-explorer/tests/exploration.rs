//! 스크립트 DOM에 대한 전체 탐색 실행 검증

use std::collections::HashSet;
use std::sync::Arc;

use autodoc_core::config::AppConfig;
use autodoc_core::error::CoreError;
use autodoc_core::models::element::InteractivePredicate;
use autodoc_explorer::scripted::{ScriptedCapturer, ScriptedDom, ScriptedElement};
use autodoc_explorer::{explore, ExplorationController, ExplorationReport, StopReason};

fn config(max_captures: u32) -> AppConfig {
    let mut config = AppConfig::default();
    config.exploration.max_captures = max_captures;
    config.exploration.scroll_settle_ms = 0;
    config.exploration.action_settle_ms = 0;
    config
}

async fn run(
    elements: Vec<ScriptedElement>,
    max_captures: u32,
) -> (ExplorationReport, Arc<ScriptedDom>) {
    let dom = Arc::new(ScriptedDom::new(elements));
    let capturer = Arc::new(ScriptedCapturer::new());
    let report = ExplorationController::new(capturer, &config(max_captures))
        .with_driver(dom.clone())
        .run()
        .await
        .unwrap();
    (report, dom)
}

fn labels(report: &ExplorationReport) -> Vec<&str> {
    report.log.iter().map(|r| r.label.as_str()).collect()
}

#[tokio::test]
async fn destructive_element_is_skipped_in_rank_order() {
    let elements = vec![
        ScriptedElement::button("Docs", 10, 300),
        ScriptedElement::button("Pricing", 200, 50),
        ScriptedElement::button("Logout", 10, 50),
    ];
    let (report, dom) = run(elements, 10).await;

    assert_eq!(labels(&report), ["Pricing", "Docs"]);
    assert_eq!(dom.clicked_texts().await, vec!["Pricing", "Docs"]);
    assert_eq!(report.stop_reason, StopReason::NoCandidates);
}

#[tokio::test]
async fn safe_elements_follow_row_then_column_order() {
    let elements = vec![
        ScriptedElement::button("Docs", 10, 300),
        ScriptedElement::button("Pricing", 200, 50),
        ScriptedElement::button("Home", 10, 50),
    ];
    let (report, _) = run(elements, 10).await;
    assert_eq!(labels(&report), ["Home", "Pricing", "Docs"]);
}

#[tokio::test]
async fn budget_of_three_is_baseline_plus_two() {
    let elements = (0..6)
        .map(|i| ScriptedElement::button(&format!("Item {i}"), 10 + i * 150, 10))
        .collect();
    let (report, dom) = run(elements, 3).await;

    assert_eq!(report.captures.len(), 3);
    assert!(report.captures[0].is_baseline());
    assert!(report.captures[1..].iter().all(|c| !c.is_baseline()));
    assert_eq!(dom.clicked_texts().await, vec!["Item 0", "Item 1"]);
    assert_eq!(report.stop_reason, StopReason::BudgetExhausted);

    let indices: Vec<u32> = report.captures.iter().map(|c| c.index).collect();
    assert_eq!(indices, [0, 1, 2]);
}

#[tokio::test]
async fn unreadable_element_is_dropped_silently() {
    let elements = vec![
        ScriptedElement::button("", 10, 10).with_failing_attributes(),
        ScriptedElement::button("Settings", 200, 10),
    ];
    let (report, _) = run(elements, 5).await;
    assert_eq!(labels(&report), ["Settings"]);
    assert_eq!(report.captures.len(), 2);
}

#[tokio::test]
async fn no_signature_is_visited_twice() {
    // 같은 요소가 여러 규칙으로 중복 열거되고, 클릭 후 새 요소가 나타난다
    let menu = ScriptedElement::button("Menu", 10, 10)
        .with_attribute("role", "button")
        .with_predicates(vec![
            InteractivePredicate::EnabledButton,
            InteractivePredicate::ButtonRole,
        ])
        .revealing(vec![
            ScriptedElement::link("Guides", "/guides", 10, 60),
            ScriptedElement::link("API", "/api", 200, 60),
        ]);
    let blog = ScriptedElement::link("Blog", "/blog", 400, 10);
    let (report, _) = run(vec![menu, blog], 20).await;

    let signatures: Vec<_> = report.log.iter().map(|r| r.signature.clone()).collect();
    let unique: HashSet<_> = signatures.iter().collect();
    assert_eq!(unique.len(), signatures.len());
    // 새로 나타난 링크도 같은 행 버킷이므로 x 순서로 Blog보다 앞선다
    assert_eq!(labels(&report), ["Menu", "Guides", "API", "Blog"]);
}

#[tokio::test]
async fn identical_dom_yields_identical_order() {
    let page = || {
        vec![
            ScriptedElement::link("C", "/c", 150, 120).with_size(40, 20),
            ScriptedElement::button("A", 20, 30),
            ScriptedElement::link("B", "/b", 50, 80).with_size(300, 40),
            ScriptedElement::button("D", 900, 5),
        ]
    };
    let (first, _) = run(page(), 10).await;
    let (second, _) = run(page(), 10).await;

    let order = |r: &ExplorationReport| {
        r.log
            .iter()
            .map(|e| e.signature.to_string())
            .collect::<Vec<_>>()
    };
    assert_eq!(order(&first), order(&second));
    // 같은 행 버킷(0)에서 x 버킷 0: B(면적 큼) → A, 그다음 D, 다음 행의 C
    assert_eq!(labels(&first), ["B", "A", "D", "C"]);
}

#[tokio::test]
async fn exploration_is_bounded_with_endless_candidates() {
    let elements = (0..200)
        .map(|i| ScriptedElement::button(&format!("Row {i}"), 10, i * 40))
        .collect();
    let (report, dom) = run(elements, 4).await;
    assert_eq!(report.captures.len(), 4);
    assert_eq!(dom.clicked_texts().await.len(), 3);
}

#[tokio::test]
async fn failing_selector_does_not_abort_scan() {
    let dom = Arc::new(
        ScriptedDom::new(vec![
            ScriptedElement::link("Docs", "/docs", 10, 10),
            ScriptedElement::button("Start", 200, 10),
        ])
        .failing_query(InteractivePredicate::LinkWithHref),
    );
    let report = ExplorationController::new(Arc::new(ScriptedCapturer::new()), &config(5))
        .with_driver(dom)
        .run()
        .await
        .unwrap();
    assert_eq!(labels(&report), ["Start"]);
}

#[tokio::test(start_paused = true)]
async fn explore_returns_captures_in_order() {
    let dom = Arc::new(ScriptedDom::new(vec![
        ScriptedElement::button("First", 10, 10),
        ScriptedElement::button("Second", 10, 200),
    ]));
    let captures = explore(dom, Arc::new(ScriptedCapturer::new()), 5)
        .await
        .unwrap();

    assert_eq!(captures.len(), 3);
    assert_eq!(captures[0].file_name(), "screen_000_initial_full.png");
    let clicked: Vec<_> = captures[1..]
        .iter()
        .map(|c| c.interaction.as_ref().unwrap().label.clone())
        .collect();
    assert_eq!(clicked, ["First", "Second"]);
    assert!(captures[2].file_name().starts_with("screen_002_action_"));
}

#[tokio::test]
async fn explore_without_driver_is_unavailable() {
    let mut controller =
        ExplorationController::new(Arc::new(ScriptedCapturer::new()), &AppConfig::default());
    assert!(matches!(
        controller.run().await,
        Err(CoreError::DriverUnavailable(_))
    ));
}
