/// Milliseconds elapsed since the unix epoch, the timestamp unit of the report model.
#[macro_export]
macro_rules! now {
    () => {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or(std::time::Duration::default())
            .as_millis()
    };
}

#[cfg(test)]
mod test {

    #[test]
    fn test_now_is_monotonic_enough() {
        let first = now!();
        let second = now!();

        assert!(first > 0);
        assert!(second >= first);
    }
}
