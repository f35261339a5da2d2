/// 에디터 작업 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// 가져온 문서가 올바른 JSON 그래프가 아닌 경우이다.
    #[error("워크플로 문서를 해석할 수 없습니다: {0}")]
    MalformedDocument(#[source] serde_json::Error),
    /// 그래프를 JSON으로 변환하지 못한 경우이다.
    #[error("워크플로를 직렬화하지 못했습니다: {0}")]
    Serialize(#[source] serde_json::Error),
    /// 존재하지 않는 노드를 참조한 경우이다.
    #[error("존재하지 않는 노드입니다: {0}")]
    UnknownNode(String),
}
