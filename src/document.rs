use std::path::Path;

use crate::editor::model::{EditorError, FlowGraph};

/// 저장 대화상자의 기본 파일 이름.
pub const DEFAULT_FILE_NAME: &str = "workflow.json";

/// 그래프를 들여쓰기된 JSON 문서로 변환한다.
pub fn export_graph(graph: &FlowGraph) -> Result<String, EditorError> {
    serde_json::to_string_pretty(graph).map_err(EditorError::Serialize)
}

/// JSON 문서를 그래프로 파싱한다. 누락된 최상위 키는 빈 목록으로 취급한다.
pub fn parse_graph(json: &str) -> Result<FlowGraph, EditorError> {
    serde_json::from_str(json).map_err(EditorError::MalformedDocument)
}

/// JSON 문서를 그래프로 가져온다. 해석할 수 없으면 오류를 기록하고 빈 그래프를 반환한다.
pub fn import_graph(json: &str) -> FlowGraph {
    match parse_graph(json) {
        Ok(graph) => graph,
        Err(err) => {
            tracing::error!(error = %err, "잘못된 워크플로 JSON입니다. 빈 그래프로 대체합니다.");
            FlowGraph::new()
        }
    }
}

/// 파일 내용을 비동기로 읽는다.
pub async fn read_document(path: &Path) -> anyhow::Result<String> {
    let contents = tokio::fs::read_to_string(path).await?;
    Ok(contents)
}

/// 문서를 비동기로 파일에 기록한다.
pub async fn write_document(path: &Path, contents: &str) -> anyhow::Result<()> {
    tokio::fs::write(path, contents).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::model::{Connection, FlowNode, NodeKind, Position};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn sample_graph() -> FlowGraph {
        let mut graph = FlowGraph::new();
        graph.add_node(FlowNode::new("s", NodeKind::Start, Position::new(-12.5, 40.0)));
        graph.add_node(FlowNode {
            id: "d".into(),
            kind: NodeKind::Decision,
            title: "승인?".into(),
            label: "two\nlines".into(),
            position: Position::new(310.25, -7.0),
        });
        graph.add_node(FlowNode::new("e", NodeKind::End, Position::new(620.0, 40.0)));
        graph.add_connection("s", "d");
        graph.add_connection("d", "e");
        graph
    }

    /// 내보낸 문서를 다시 가져오면 같은 그래프가 된다.
    #[test]
    fn export_import_round_trip() {
        let graph = sample_graph();
        let json = export_graph(&graph).expect("내보내기 실패");
        assert_eq!(import_graph(&json), graph);
        assert_eq!(import_graph(&export_graph(&FlowGraph::new()).expect("내보내기 실패")), FlowGraph::new());
    }

    /// 내보낸 문서는 nodes/connections 최상위 키와 type 필드를 갖는다.
    #[test]
    fn export_uses_expected_shape() {
        let json = export_graph(&sample_graph()).expect("내보내기 실패");
        assert!(json.contains('\n'), "들여쓰기된 JSON이어야 합니다");
        let value: serde_json::Value = serde_json::from_str(&json).expect("JSON 파싱 실패");
        assert_eq!(value["nodes"][1]["type"], "Decision");
        assert_eq!(value["connections"][0]["from"], "s");
        assert_eq!(value["connections"][0]["to"], "d");
    }

    /// JSON이 아닌 입력은 빈 그래프가 된다.
    #[test]
    fn malformed_input_falls_back_to_empty() {
        assert_eq!(import_graph("not json"), FlowGraph::new());
        assert_eq!(import_graph(r#"{"nodes": "oops"}"#), FlowGraph::new());
        assert!(matches!(
            parse_graph("not json"),
            Err(EditorError::MalformedDocument(_))
        ));
    }

    /// 누락된 최상위 키는 빈 목록으로, 모르는 키는 무시된다.
    #[test]
    fn missing_keys_default_to_empty() {
        let graph = import_graph(r#"{"connections": [{"from": "a", "to": "b"}], "extra": 1}"#);
        assert!(graph.nodes.is_empty());
        assert_eq!(graph.connections, vec![Connection::new("a", "b")]);
        assert_eq!(import_graph("{}"), FlowGraph::new());
    }

    /// 제목이 없는 노드는 빈 제목으로 읽힌다.
    #[test]
    fn node_without_title_is_accepted() {
        let graph = import_graph(
            r#"{"nodes": [{"id": "t", "type": "Task", "label": "x", "position": {"x": 1, "y": 2}}]}"#,
        );
        assert_eq!(graph.nodes[0].title, "");
        assert_eq!(graph.nodes[0].position, Position::new(1.0, 2.0));
    }

    /// 값이 null인 최상위 키는 빈 목록으로 취급하고 나머지 노드는 유지한다.
    #[test]
    fn null_top_level_key_keeps_other_entries() {
        let graph = import_graph(
            r#"{"nodes": [{"id": "s", "type": "Start", "title": "시작", "label": "", "position": {"x": 0, "y": 0}}], "connections": null}"#,
        );
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].id, "s");
        assert!(graph.connections.is_empty());
        assert_eq!(import_graph(r#"{"nodes": null, "connections": null}"#), FlowGraph::new());
    }

    /// null 제목/설명은 빈 문자열이 되고, 해석할 수 없는 노드만 건너뛴다.
    #[test]
    fn bad_nodes_are_skipped_individually() {
        let graph = import_graph(
            r#"{
                "nodes": [
                    {"id": "t", "type": "Task", "title": null, "label": null, "position": {"x": 5, "y": 6}},
                    {"id": "x", "type": "Loop", "title": "?", "label": "", "position": {"x": 0, "y": 0}},
                    {"id": 1}
                ],
                "connections": [{"from": "t", "to": "e"}, {"from": 3}]
            }"#,
        );
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].id, "t");
        assert_eq!(graph.nodes[0].title, "");
        assert_eq!(graph.nodes[0].label, "");
        assert_eq!(graph.connections, vec![Connection::new("t", "e")]);
    }

    /// 정밀한 좌표와 큰 좌표도 저장 후 다시 읽으면 그대로 남는다.
    #[test]
    fn coordinates_survive_round_trip_exactly() {
        let json = r#"{"nodes": [
            {"id": "p", "type": "Task", "title": "a", "label": "", "position": {"x": 1234.56789012, "y": -0.1}},
            {"id": "b", "type": "End", "title": "b", "label": "", "position": {"x": 1e39, "y": 2.5e-7}}
        ]}"#;
        let graph = import_graph(json);
        assert_eq!(graph.nodes[0].position, Position::new(1234.56789012, -0.1));
        assert_eq!(graph.nodes[1].position, Position::new(1e39, 2.5e-7));
        let exported = export_graph(&graph).expect("내보내기 실패");
        assert!(exported.contains("1234.56789012"));
        assert!(!exported.contains("null"));
        assert_eq!(import_graph(&exported), graph);
    }

    /// 파일로 저장한 문서를 비동기로 다시 읽을 수 있다.
    #[tokio::test]
    async fn write_then_read_document() {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("시스템 시간이 UTC epoch 이전입니다.")
            .as_nanos();
        let base_dir = std::env::temp_dir().join(format!("flow_document_test_{timestamp}"));
        std::fs::create_dir_all(&base_dir).expect("임시 디렉터리 생성 실패");
        let path = base_dir.join(DEFAULT_FILE_NAME);

        let json = export_graph(&sample_graph()).expect("내보내기 실패");
        write_document(&path, &json).await.expect("파일 저장 실패");
        let read_back = read_document(&path).await.expect("파일 읽기 실패");
        assert_eq!(import_graph(&read_back), sample_graph());
        assert!(read_document(&base_dir.join("missing.json")).await.is_err());

        let _ = std::fs::remove_dir_all(&base_dir);
    }
}
