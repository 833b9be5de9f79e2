pub fn render() -> String {
    let mut out = String::new();
    out.push_str("── Lab Test Booking System ──\n");
    out.push_str("Enter a phone number to look up bookings.\n");
    out.push_str("Commands: <phone> | new (create a booking) | quit\n");
    out
}
