mod test_device_capabilities;
