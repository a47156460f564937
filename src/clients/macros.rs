/// Generates the constructor, the record reader, the clear method and
/// `shutdown` for a client wrapping a single `RecordClient`.
///
/// `$clear_vis` sets the visibility of `clear_<name>`, so clients that gate
/// clearing behind another method can keep it private with `pub(self)`.
#[macro_export]
macro_rules! impl_record_client {
    ($client_name:ident, $record:ty, $error:ty, $record_name_snake:ident, $clear_vis:vis) => {
        paste::paste! {
            #[allow(dead_code)]
            impl $client_name {
                pub fn new(inner: $crate::actor_framework::RecordClient<$record>) -> Self {
                    Self { inner }
                }

                #[tracing::instrument(skip(self))]
                pub async fn $record_name_snake(&self) -> Result<$record, $error> {
                    tracing::debug!("Sending request");
                    Ok(self.inner.get().await?.unwrap_or_default())
                }

                #[tracing::instrument(skip(self))]
                $clear_vis async fn [<clear_ $record_name_snake>](&self) -> Result<(), $error> {
                    tracing::debug!("Sending request");
                    self.inner.clear().await
                }

                pub async fn shutdown(&self) -> Result<(), $error> {
                    self.inner.shutdown().await
                }
            }
        }
    };
}
