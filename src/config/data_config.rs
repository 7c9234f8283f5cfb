//! 데이터/서버/환경 관련 설정 모듈
//!
//! 환경 변수 기반의 설정값들을 타입 안전하게 읽어오는 헬퍼들입니다.
//! Spring의 `application.yml` + `@Value` 조합을 환경 변수 기반으로 대체합니다.

use std::env;

/// 실행 환경 구분
///
/// `ENVIRONMENT` 환경 변수로 결정되며, bcrypt cost 등
/// 환경별로 달라지는 기본값 선택에 사용됩니다.
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    pub fn current() -> Self {
        match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "production".to_string())
            .to_lowercase()
            .as_str()
        {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 비밀번호 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// bcrypt cost 값을 반환합니다.
    ///
    /// `BCRYPT_COST` 환경 변수가 4~15 범위의 유효한 값이면 그대로 사용하고,
    /// 아니면 현재 환경에 맞는 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if cost >= 4 && cost <= 15 {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    /// 환경별 bcrypt cost 기본값
    ///
    /// 개발/테스트 환경에서는 빠른 반복을 위해 낮은 cost를,
    /// 운영 환경에서는 보안을 위해 높은 cost를 사용합니다.
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// HTTP 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }
}

/// 영상 파일 저장소 설정
///
/// 업로드된 영상은 로컬 파일시스템에 저장됩니다.
/// 디렉토리는 프로세스 시작 시 `main.rs`에서 생성됩니다.
pub struct StorageConfig;

impl StorageConfig {
    /// 영상 파일 업로드 디렉토리
    ///
    /// # 환경 변수
    ///
    /// ```bash
    /// export VIDEO_UPLOAD_DIR="/var/lib/lecture-service/videos"
    /// ```
    pub fn upload_dir() -> String {
        env::var("VIDEO_UPLOAD_DIR")
            .unwrap_or_else(|_| "uploads/videos".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_str() {
        assert_eq!(Environment::from_str("dev"), Environment::Development);
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("staging"), Environment::Staging);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_bcrypt_cost_per_environment() {
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Development), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Staging), 10);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Production), 12);
    }
}
