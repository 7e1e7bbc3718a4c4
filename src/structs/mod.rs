pub mod exif_info;
