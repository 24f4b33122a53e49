pub mod instagram_media_service;
