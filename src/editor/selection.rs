use super::model::Connection;

/// 현재 선택 대상이다. 연결은 문자열 키 대신 순서쌍 자체로 보관한다.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// 선택 없음.
    #[default]
    None,
    /// 노드 선택.
    Node(String),
    /// 연결 선택.
    Connection(Connection),
}

impl Selection {
    /// 선택된 노드 ID를 반환한다.
    pub fn node_id(&self) -> Option<&str> {
        match self {
            Selection::Node(id) => Some(id),
            _ => None,
        }
    }

    /// 선택된 연결을 반환한다.
    pub fn connection(&self) -> Option<&Connection> {
        match self {
            Selection::Connection(conn) => Some(conn),
            _ => None,
        }
    }

    /// 선택이 비어 있는지 확인한다.
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }
}
