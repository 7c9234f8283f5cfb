//! 채팅 관련 요청 DTO

use serde::Deserialize;
use validator::Validate;

/// 메시지 전송 요청
///
/// `receiver_id`가 없으면 전체 공개 메시지, `video_id`가 있으면
/// 해당 강의에 연결된 메시지입니다. 발신자는 인증 컨텍스트에서 결정되며
/// 요청 본문으로는 절대 받지 않습니다.
#[derive(Debug, Deserialize, Validate)]
pub struct ChatMessageRequest {
    pub receiver_id: Option<String>,

    pub video_id: Option<String>,

    #[validate(length(min = 1, max = 2000, message = "메시지 내용을 입력해주세요"))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message_is_rejected() {
        let request = ChatMessageRequest {
            receiver_id: None,
            video_id: None,
            message: "".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_broadcast_message_without_receiver_is_valid() {
        let request = ChatMessageRequest {
            receiver_id: None,
            video_id: None,
            message: "수업 시작합니다".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
