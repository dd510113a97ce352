pub const MIN_USERNAME_CHARS: usize = 3;
pub const MAX_USERNAME_CHARS: usize = 50;
pub const MIN_PASSWORD_CHARS: usize = 6;
pub const MAX_PASSWORD_CHARS: usize = 100;

fn is_allowed_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

pub fn validate_username(username: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username không được để trống".to_string());
    }

    let length = username.chars().count();
    if length < MIN_USERNAME_CHARS {
        return Err("Username phải ít nhất 3 ký tự".to_string());
    }
    if length > MAX_USERNAME_CHARS {
        return Err("Username không được vượt quá 50 ký tự".to_string());
    }

    if !username.chars().all(is_allowed_username_char) {
        return Err("Username chỉ chứa chữ, chấm, gạch dưới, và gạch ngang".to_string());
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Mật khẩu không được để trống".to_string());
    }

    let length = password.chars().count();
    if length < MIN_PASSWORD_CHARS {
        return Err("Mật khẩu phải ít nhất 6 ký tự".to_string());
    }
    if length > MAX_PASSWORD_CHARS {
        return Err("Mật khẩu không được vượt quá 100 ký tự".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err("Mật khẩu phải chứa ít nhất một chữ cái".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Mật khẩu phải chứa ít nhất một số".to_string());
    }

    Ok(())
}
