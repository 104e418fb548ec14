mod test_empty_body_is_ignored;
mod test_no_pending_connection;
mod test_offer_reaches_waiting_session;
