use rand::Rng;
use tracing::info;

/// Length-stable six digit code, 100000..=999999.
pub fn generate_otp() -> String {
    let code: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
    code.to_string()
}

/// Delivery channel for one-time codes. The default implementation just
/// logs the code; an SMS gateway slots in behind this trait.
pub trait OtpSender: Send + Sync {
    fn send(&self, phone: &str, code: &str);
}

pub struct LogOtpSender;

impl OtpSender for LogOtpSender {
    fn send(&self, phone: &str, code: &str) {
        info!(phone = %phone, "OTP issued: {}", code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_is_always_six_digits() {
        for _ in 0..1000 {
            let code = generate_otp();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(code.chars().next(), Some('0'));
        }
    }
}
