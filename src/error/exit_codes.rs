use crate::error::WwdlError;

pub fn get_exit_code(error: &WwdlError) -> i32 {
    match error {
        WwdlError::ConfigError(_) | WwdlError::InvalidConfig(_) => 2,

        e if e.is_lookup() => 3,
        WwdlError::ServerNotFound(_) | WwdlError::NoAvailableVersion { .. } => 3,

        WwdlError::Schema { .. } | WwdlError::Parse { .. } | WwdlError::Json(_) => 4,

        WwdlError::Transport { .. } | WwdlError::Network { .. } => 20,

        _ => 1,
    }
}
