pub fn render() -> String {
    let mut out = String::new();
    out.push_str("── Create New Booking ──\n");
    out.push_str("You will be asked for each field in turn.\n");
    out.push_str("Commands: fill (enter booking details) | back\n");
    out
}
