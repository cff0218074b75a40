pub mod team_feed;
