fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Ensure a protoc binary is available without requiring a system install.
    if std::env::var_os("PROTOC").is_none() {
        if let Ok(protoc) = protoc_bin_vendored::protoc_bin_path() {
            std::env::set_var("PROTOC", protoc);
        }
    }

    // Compile auth service proto
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/auth.proto"], &["proto/"])?;

    // Compile catalog service proto
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/catalog.proto"], &["proto/"])?;

    // Compile payment service proto
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/payment.proto"], &["proto/"])?;

    Ok(())
}
